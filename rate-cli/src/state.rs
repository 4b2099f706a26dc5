//! Session state for the command line front end.
//!
//! The engine is pure; this struct owns what changes between calls: the
//! rate history, the last calculation, the store and the market source.

use chrono::{DateTime, Utc};
use rate_core::calculations::{
    BudgetComparison, Ledger, LedgerError, LedgerSummary, RateCalculation, RateEngine, RateEngineError,
    TransactionFilter, ValidationError, compare_budget, validate_transaction,
};
use rate_core::history::RateHistory;
use rate_core::market::{MarketRateSource, MarketReport, load_market_report};
use rate_core::{
    Currency, FreelanceRepository, NewTransaction, RateInputs, RepositoryError, SavedCalculation,
    Transaction,
};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum StateError {
    #[error(transparent)]
    Engine(#[from] RateEngineError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("no calculation to save; run a calculation first")]
    NothingToSave,
}

pub struct AppState {
    engine: RateEngine,
    history: RateHistory,
    last: Option<(RateInputs, RateCalculation)>,
    repo: Box<dyn FreelanceRepository>,
    market: Box<dyn MarketRateSource>,
}

impl AppState {
    pub fn new(
        engine: RateEngine,
        repo: Box<dyn FreelanceRepository>,
        market: Box<dyn MarketRateSource>,
    ) -> Self {
        Self {
            engine,
            history: RateHistory::new(),
            last: None,
            repo,
            market,
        }
    }

    pub fn engine(&self) -> &RateEngine {
        &self.engine
    }

    pub fn history(&self) -> &RateHistory {
        &self.history
    }

    pub fn repo(&self) -> &dyn FreelanceRepository {
        self.repo.as_ref()
    }

    /// Runs the engine and, on success, records the rate in the history.
    /// A failed calculation leaves the session untouched.
    pub fn calculate(
        &mut self,
        inputs: RateInputs,
        at: DateTime<Utc>,
    ) -> Result<RateCalculation, StateError> {
        let calculation = self.engine.calculate(&inputs)?;
        self.history.record_calculation(&calculation, at);
        self.last = Some((inputs, calculation.clone()));
        Ok(calculation)
    }

    /// Stores the most recent calculation.
    pub async fn save_last(
        &self,
        at: DateTime<Utc>,
    ) -> Result<SavedCalculation, StateError> {
        let (inputs, calculation) = self.last.as_ref().ok_or(StateError::NothingToSave)?;
        let saved = SavedCalculation {
            inputs: inputs.clone(),
            results: calculation.result,
            date: at,
        };
        self.repo.save_calculation(saved.clone()).await?;
        info!(hourly = %saved.results.hourly, "Saved calculation");
        Ok(saved)
    }

    pub fn compare_budget(
        &self,
        budget: Decimal,
        project_hours: Decimal,
        currency: Currency,
    ) -> Result<BudgetComparison, StateError> {
        Ok(compare_budget(budget, project_hours, currency)?)
    }

    pub async fn market_report(
        &self,
        region: &str,
    ) -> MarketReport {
        load_market_report(self.market.as_ref(), region).await
    }

    /// Validates and records a transaction.
    pub async fn add_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<Transaction, StateError> {
        validate_transaction(&transaction)?;
        let stored = self.repo.add_transaction(transaction).await?;
        info!(id = stored.id, kind = %stored.kind, amount = %stored.amount, "Recorded transaction");
        Ok(stored)
    }

    pub async fn transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, StateError> {
        let all = self.repo.list_transactions().await?;
        Ok(Ledger::new(&all)
            .filter(filter)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn ledger_summary(&self) -> Result<LedgerSummary, StateError> {
        let all = self.repo.list_transactions().await?;
        Ok(Ledger::new(&all).summary()?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};
    use pretty_assertions::assert_eq;
    use rate_core::calculations::RateBand;
    use rate_core::market::{ReportSource, StaticMarketRateSource};
    use rate_core::{Industry, SkillLevel, TransactionKind};
    use rate_db_sqlite::SqliteRepository;
    use rust_decimal_macros::dec;

    use super::*;

    async fn state() -> AppState {
        let repo = SqliteRepository::new(":memory:").await.unwrap();
        repo.run_migrations().await.unwrap();
        AppState::new(
            RateEngine::default(),
            Box::new(repo),
            Box::new(StaticMarketRateSource::unavailable("offline")),
        )
    }

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 1, 12, minute, 0).unwrap()
    }

    fn inputs(income: Decimal) -> RateInputs {
        RateInputs {
            skill_level: Some(SkillLevel::Intermediate),
            industry: Some(Industry::WebDevelopment),
            desired_annual_income: Some(income),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn calculate_records_history_and_saves_last() {
        let mut state = state().await;

        let calculation = state.calculate(inputs(dec!(104000)), at(0)).unwrap();
        let saved = state.save_last(at(1)).await.unwrap();

        assert_eq!(calculation.result.hourly, dec!(62.50));
        assert_eq!(state.history().len(), 1);
        assert_eq!(saved.results, calculation.result);
        assert_eq!(
            state.repo().list_saved_calculations().await.unwrap(),
            vec![saved]
        );
    }

    #[tokio::test]
    async fn failed_calculation_leaves_history_alone() {
        let mut state = state().await;

        let err = state.calculate(RateInputs::default(), at(0)).unwrap_err();

        assert!(matches!(err, StateError::Engine(RateEngineError::Validation(_))));
        assert!(state.history().is_empty());
        assert!(matches!(
            state.save_last(at(1)).await,
            Err(StateError::NothingToSave)
        ));
    }

    #[tokio::test]
    async fn history_keeps_ten_most_recent() {
        let mut state = state().await;

        for i in 1..=11u32 {
            state
                .calculate(inputs(Decimal::from(i * 10_000)), at(i))
                .unwrap();
        }

        let dates: Vec<_> = state.history().entries().map(|e| e.date).collect();
        assert_eq!(dates.len(), 10);
        assert_eq!(dates[0], at(2));
        assert_eq!(dates[9], at(11));
    }

    #[tokio::test]
    async fn invalid_transaction_is_not_stored() {
        let state = state().await;
        let new = NewTransaction {
            kind: TransactionKind::Expense,
            amount: dec!(-3),
            date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            category: None,
            description: None,
        };

        let err = state.add_transaction(new).await.unwrap_err();

        assert!(matches!(err, StateError::Validation(_)));
        assert!(state.repo().list_transactions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn ledger_summary_reflects_stored_transactions() {
        let state = state().await;
        for (kind, amount) in [
            (TransactionKind::Income, dec!(1200)),
            (TransactionKind::Expense, dec!(200)),
        ] {
            state
                .add_transaction(NewTransaction {
                    kind,
                    amount,
                    date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
                    category: Some("Other".to_string()),
                    description: None,
                })
                .await
                .unwrap();
        }

        let summary = state.ledger_summary().await.unwrap();
        let expenses = state
            .transactions(&TransactionFilter {
                kind: Some(TransactionKind::Expense),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(summary.net, dec!(1000));
        assert_eq!(summary.transaction_count, 2);
        assert_eq!(summary.expenses_by_category.get("Other"), Some(&dec!(200)));
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].id, 2);
    }

    #[tokio::test]
    async fn compare_and_market_use_pure_helpers() {
        let state = state().await;

        let comparison = state
            .compare_budget(dec!(6000), dec!(40), Currency::Usd)
            .unwrap();
        let report = state.market_report("Europe").await;

        assert_eq!(comparison.band, RateBand::Premium);
        assert_eq!(report.source, ReportSource::Fallback);
    }
}
