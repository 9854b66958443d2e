// 1. The Controller
pub use crate::journal::{FormState, Journal, JournalEvent, Subscriber, sample_trades};

// 2. Trade Types
pub use crate::trade::{
    Closed, Exit, Status, StatusKind, Trade, TradeDraft, TradeForm, TradeRecord,
};

// 3. Domain Types
pub use crate::data::domain::{Action, Price, Quantity, Symbol, Tags, TradeId};

// 4. Filtering
pub use crate::data::filter::{FilterSummary, StatusFilter, StrategyFilter, TradeQuery};

// 5. Reports
pub use crate::report::{
    Analytics,
    cumulative_returns::{CumulativePoint, CumulativeReturns},
    grouped::{StrategyPerformance, StrategyStats},
    io::read_import_file,
    monthly_returns::{MonthlyBucket, MonthlyReturns},
    trade_statistics::{Overview, WinLoss},
};

// 6. Configuration
pub use crate::config::{JournalConfig, JournalPreset};

// 7. Errors
pub use crate::error::{ImportError, IoError, JournalError, JournalResult, TradeError};
