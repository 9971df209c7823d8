//! 정적 프론트엔드 번들 서빙.
//!
//! API 라우트에 매칭되지 않은 모든 경로는 번들 디렉터리에서 찾고,
//! 파일이 없으면 `index.html`을 반환합니다 (클라이언트 라우팅).

use budget_core::FrontendConfig;
use tower_http::services::{ServeDir, ServeFile};
use tracing::{info, warn};

/// 번들 디렉터리 서비스. 디렉터리가 없으면 None.
pub fn frontend_service(config: &FrontendConfig) -> Option<ServeDir<ServeFile>> {
    let dist_dir = &config.dist_dir;
    if !dist_dir.is_dir() {
        warn!(
            dist_dir = %dist_dir.display(),
            "Frontend bundle directory not found, static fallback disabled"
        );
        return None;
    }

    info!(dist_dir = %dist_dir.display(), "Serving frontend bundle");
    let index = ServeFile::new(config.index_file());
    Some(ServeDir::new(dist_dir).fallback(index))
}
