//! Immutable per-variant default endpoints and scope.

/// Per-variant default endpoints and scope.
///
/// Variants declare their defaults as an associated constant; the values are applied to a
/// [`ProviderData`](crate::provider::ProviderData) with set-if-absent semantics so
/// externally configured fields always win.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProviderDefaults {
	/// Display name of the provider.
	pub name: &'static str,
	/// Authorization endpoint the user is redirected to.
	pub login_url: &'static str,
	/// Token endpoint used by the gateway's code exchange.
	pub redeem_url: &'static str,
	/// Endpoint returning claims about the authenticated user.
	pub profile_url: &'static str,
	/// Endpoint used to check access-token liveness.
	pub validate_url: &'static str,
	/// Space-delimited scope requested at login.
	pub scope: &'static str,
}
