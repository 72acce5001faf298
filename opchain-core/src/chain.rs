use opchain_types::{
    ContractQuote, ExpirationFilter, OptionChainSnapshot, OptionTransfer, OptionType,
};

/// Walk a chain snapshot into staged transfers, calls before puts per batch.
///
/// Batches whose expiration is rejected by `filter` (relative to
/// `start_of_today_ms`) contribute nothing.
#[must_use]
pub fn chain_to_transfers(
    snapshot: &OptionChainSnapshot,
    filter: ExpirationFilter,
    start_of_today_ms: i64,
) -> Vec<OptionTransfer> {
    let mut out = Vec::with_capacity(snapshot.contract_count());
    for batch in &snapshot.options {
        if !filter.keeps(start_of_today_ms, batch.expiration_date) {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                symbol = %snapshot.underlying_symbol,
                expiration = batch.expiration_date,
                "skipping expiration batch"
            );
            continue;
        }
        let stage = |q: &ContractQuote, option_type: OptionType| OptionTransfer {
            stock_listing: snapshot.underlying_symbol.clone(),
            settlement_date: batch.expiration_date,
            strike_price: q.strike,
            implied_volatility: q.implied_volatility,
            open_interest: q.open_interest,
            option_type,
        };
        out.extend(batch.calls.iter().map(|q| stage(q, OptionType::Call)));
        out.extend(batch.puts.iter().map(|q| stage(q, OptionType::Put)));
    }
    out
}
