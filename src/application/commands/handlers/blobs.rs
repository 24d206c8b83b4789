//! 媒体文件清理辅助

use crate::application::ports::BlobStoragePort;

/// 删除不再被引用的文件（被替换或随记录删除），失败只记录日志
pub(crate) async fn discard_blob(storage: &dyn BlobStoragePort, url: &str) {
    if url.is_empty() {
        return;
    }
    if let Err(e) = storage.delete(url).await {
        tracing::warn!(url = %url, error = %e, "Failed to delete unreferenced blob");
    }
}
