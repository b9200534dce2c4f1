use lazy_static::lazy_static;
use prometheus::{IntCounter, Opts, Registry};

lazy_static! {
    pub static ref ROTATIONS: IntCounter = IntCounter::with_opts(
        Opts::new("rotations", "Single rotations performed while rebalancing").namespace("arbor")
    )
    .unwrap();
    pub static ref INSERTS: IntCounter = IntCounter::with_opts(
        Opts::new("inserts", "Keys added to balanced trees").namespace("arbor")
    )
    .unwrap();
    pub static ref ERASES: IntCounter = IntCounter::with_opts(
        Opts::new("erases", "Keys removed from balanced trees").namespace("arbor")
    )
    .unwrap();
}

/// Register the tree counters with a prometheus registry.
pub fn register_metrics(registry: &Registry) -> anyhow::Result<()> {
    registry.register(Box::new(ROTATIONS.clone()))?;
    registry.register(Box::new(INSERTS.clone()))?;
    registry.register(Box::new(ERASES.clone()))?;
    Ok(())
}
