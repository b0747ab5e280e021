//! Fixed-risk position sizing
//!
//! Sizes a position so that a stop-out loses exactly the configured
//! percentage of the account, and targets a 1:1 reward-to-risk exit.

use rust_decimal_macros::dec;
use std::time::Instant;

use super::request::TradeRequest;
use super::result::PositionResult;
use super::types::{Direction, SizingError};
use super::PositionSizer;
use crate::instrument::InstrumentRegistry;
use crate::telemetry::{increment_counter, record_latency, CounterMetric, LatencyMetric};

/// Position sizing engine. Holds no mutable state.
#[derive(Debug, Clone, Default)]
pub struct PositionSizingEngine {
    registry: InstrumentRegistry,
}

impl PositionSizingEngine {
    /// Create an engine over the standard instrument table
    pub fn new() -> Self {
        Self {
            registry: InstrumentRegistry::new(),
        }
    }

    pub fn registry(&self) -> &InstrumentRegistry {
        &self.registry
    }

    /// Size a trade
    pub fn calculate(&self, request: &TradeRequest) -> Result<PositionResult, SizingError> {
        let started = Instant::now();
        let result = self.compute(request);
        record_latency(LatencyMetric::PositionCalculation, started.elapsed());

        match &result {
            Ok(position) => {
                increment_counter(CounterMetric::CalculationsSucceeded);
                tracing::debug!(
                    pair = %position.currency_pair,
                    direction = %position.direction,
                    lots = %position.lot_size,
                    margin = %position.margin_required,
                    "Position sized"
                );
            }
            Err(e) => {
                increment_counter(CounterMetric::CalculationsFailed);
                tracing::warn!(pair = %request.currency_pair, error = %e, "Position sizing failed");
            }
        }

        result
    }

    fn compute(&self, request: &TradeRequest) -> Result<PositionResult, SizingError> {
        let violations = request.violations();
        if !violations.is_empty() {
            return Err(SizingError::InvalidInput(violations));
        }

        let instrument = self.registry.lookup(&request.currency_pair);
        let spec = instrument.spec;
        let class = instrument.class;

        let risk_amount = (request.risk_percent / dec!(100))
            .checked_mul(request.account_size)
            .ok_or(SizingError::Overflow("risk amount"))?;
        if risk_amount.is_zero() {
            return Err(SizingError::Underflow("risk amount"));
        }

        let price_difference = (request.entry_price - request.stop_loss).abs();

        // A long position places its stop below entry
        let direction = if request.stop_loss < request.entry_price {
            Direction::Long
        } else {
            Direction::Short
        };

        let pips_at_risk = price_difference
            .checked_mul(spec.pip_multiplier)
            .ok_or(SizingError::Overflow("pips at risk"))?;

        let pip_value = class
            .pip_value(&spec, request.entry_price)
            .filter(|v| !v.is_zero())
            .ok_or_else(|| SizingError::DegeneratePipValue(instrument.symbol.clone()))?;

        let risk_per_lot = pips_at_risk
            .checked_mul(pip_value)
            .filter(|v| !v.is_zero())
            .ok_or_else(|| SizingError::DegeneratePipValue(instrument.symbol.clone()))?;

        let lot_size = risk_amount
            .checked_div(risk_per_lot)
            .ok_or(SizingError::Overflow("lot size"))?;
        if lot_size.is_zero() {
            return Err(SizingError::Underflow("lot size"));
        }

        let margin_required = class
            .margin(&spec, lot_size, request.entry_price, request.leverage)
            .ok_or(SizingError::Overflow("margin"))?;
        if margin_required.is_zero() {
            return Err(SizingError::Underflow("margin"));
        }

        let margin_percent = margin_required
            .checked_div(request.account_size)
            .and_then(|ratio| ratio.checked_mul(dec!(100)))
            .ok_or(SizingError::Overflow("margin percent"))?;

        let profit_price = match direction {
            Direction::Long => request.entry_price.checked_add(price_difference),
            Direction::Short => request.entry_price.checked_sub(price_difference),
        }
        .ok_or(SizingError::Overflow("take profit"))?;

        Ok(PositionResult {
            lot_size,
            risk_amount,
            margin_required,
            margin_percent,
            potential_profit: risk_amount,
            profit_price,
            pips_at_risk,
            pip_value,
            is_long: direction.is_long(),
            direction,
            instrument_class: class,
            account_size: request.account_size,
            risk_percent: request.risk_percent,
            entry_price: request.entry_price,
            stop_loss: request.stop_loss,
            currency_pair: instrument.symbol,
            leverage: request.leverage,
        })
    }
}

impl PositionSizer for PositionSizingEngine {
    fn calculate(&self, request: &TradeRequest) -> Result<PositionResult, SizingError> {
        PositionSizingEngine::calculate(self, request)
    }

    fn mode_name(&self) -> &'static str {
        "fixed_risk"
    }
}
