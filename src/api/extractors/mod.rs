/*!
 * Request extractors
 *
 * Responsibility:
 * - handler が受け取る値 (credential, post id, 検証済み JSON body) を組み立てる
 * - 失敗は AppError として返す (401 / 400)
 */

mod credential;
mod post_id;
mod valid_json;

pub use credential::RequiredCredential;
pub use post_id::PostId;
pub use valid_json::{Validate, ValidJson};
