/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: AuthGate を route_layer として掛ける
 * - cors / http / security_headers: 全ルート共通
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
