//! Repository pattern for database operations.
//!
//! 데이터베이스 접근 로직을 라우트 핸들러에서 분리하여 관리합니다.
//! 모든 Repository는 static methods 패턴을 사용합니다.
//!
//! 소유권 범위 저장소는 `&mut SqliteConnection`을 받으므로 호출자가
//! 트랜잭션(`&mut *tx`)이나 풀 연결 중 무엇을 쓸지 결정합니다.

pub mod analytics;
pub mod categories;
pub mod debts;
pub mod dump_bins;
pub mod users;

pub use analytics::AnalyticsRepository;
pub use categories::{AllocationItemInput, CategoryInput, CategoryRepository};
pub use debts::{DebtInput, DebtRepository, DebtUpdate, PaymentInput};
pub use dump_bins::{AmountInput, DumpBinInput, DumpBinRepository, DumpBinUpdate};
pub use users::UserRepository;
