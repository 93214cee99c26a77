//! Caller-supplied cancellation and timeout scope for provider calls.
//!
//! Every outbound provider request runs under a [`RequestContext`]. Cancelling the
//! context's token (or letting its timeout elapse) makes the in-flight call resolve
//! promptly with [`Error::Cancelled`] / [`Error::DeadlineExceeded`] instead of blocking.

// crates.io
use tokio_util::sync::CancellationToken;
// self
use crate::_prelude::*;

/// Cancellation token plus an optional per-call timeout.
#[derive(Clone, Debug, Default)]
pub struct RequestContext {
	cancellation: CancellationToken,
	timeout: Option<StdDuration>,
}
impl RequestContext {
	/// Context that is never cancelled and has no timeout.
	pub fn background() -> Self {
		Self::default()
	}

	/// Wraps an existing token so a gateway-wide shutdown signal reaches provider calls.
	pub fn with_cancellation(token: CancellationToken) -> Self {
		Self { cancellation: token, timeout: None }
	}

	/// Sets the timeout applied to each call run under this context.
	pub fn with_timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Derives a context whose token is cancelled with the parent but can also be cancelled
	/// on its own.
	pub fn child(&self) -> Self {
		Self { cancellation: self.cancellation.child_token(), timeout: self.timeout }
	}

	/// Returns the underlying cancellation token.
	pub fn cancellation_token(&self) -> &CancellationToken {
		&self.cancellation
	}

	/// Returns the configured timeout.
	pub fn timeout(&self) -> Option<StdDuration> {
		self.timeout
	}

	/// Cancels the context (and every child derived from it).
	pub fn cancel(&self) {
		self.cancellation.cancel();
	}

	/// Returns true once the context has been cancelled.
	pub fn is_cancelled(&self) -> bool {
		self.cancellation.is_cancelled()
	}

	/// Drives `fut` to completion unless the context is cancelled or times out first.
	pub async fn run<F, T>(&self, fut: F) -> Result<T>
	where
		F: Future<Output = Result<T>>,
	{
		if self.is_cancelled() {
			return Err(Error::Cancelled);
		}

		let bounded = async {
			match self.timeout {
				Some(limit) => tokio::time::timeout(limit, fut)
					.await
					.unwrap_or_else(|_| Err(Error::DeadlineExceeded)),
				None => fut.await,
			}
		};

		tokio::select! {
			biased;
			_ = self.cancellation.cancelled() => Err(Error::Cancelled),
			result = bounded => result,
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn run_passes_through_results() {
		let ctx = RequestContext::background();
		let value = ctx.run(async { Ok(7_u8) }).await.expect("Background context should not fail.");

		assert_eq!(value, 7);
	}

	#[tokio::test]
	async fn cancelled_context_fails_before_polling() {
		let ctx = RequestContext::background();

		ctx.cancel();

		let err = ctx
			.run(std::future::ready::<Result<()>>(Ok(())))
			.await
			.expect_err("Cancelled context should short-circuit.");

		assert!(matches!(err, Error::Cancelled));
	}

	#[tokio::test]
	async fn cancellation_interrupts_pending_future() {
		let ctx = RequestContext::background();
		let trigger = ctx.clone();
		let handle = tokio::spawn(async move {
			ctx.run(std::future::pending::<Result<()>>()).await
		});

		tokio::time::sleep(StdDuration::from_millis(10)).await;
		trigger.cancel();

		let err = handle
			.await
			.expect("Task should join cleanly.")
			.expect_err("Pending future should be cancelled.");

		assert!(matches!(err, Error::Cancelled));
	}

	#[tokio::test]
	async fn timeout_maps_to_deadline_exceeded() {
		let ctx = RequestContext::background().with_timeout(StdDuration::from_millis(5));
		let err = ctx
			.run(std::future::pending::<Result<()>>())
			.await
			.expect_err("Pending future should time out.");

		assert!(matches!(err, Error::DeadlineExceeded));
		assert!(err.is_cancellation());
	}

	#[test]
	fn child_follows_parent_cancellation() {
		let parent = RequestContext::background();
		let child = parent.child();

		parent.cancel();

		assert!(child.is_cancelled());
	}
}
