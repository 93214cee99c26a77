// self
use crate::obs::{CallOutcome, ProviderCall};

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_call_outcome(provider: &str, call: ProviderCall, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth2_gateway_provider_call_total",
			"provider" => provider.to_owned(),
			"call" => call.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (provider, call, outcome);
	}
}
