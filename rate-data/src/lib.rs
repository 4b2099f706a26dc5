//! CSV export of saved calculations and ledger transactions.

mod export;

pub use export::{
    CALCULATION_HEADERS, CalculationExporter, ExportError, SELECTED_SKILLS_HEADER,
    TRANSACTION_HEADERS, TransactionExporter,
};
