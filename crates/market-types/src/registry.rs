//! Registry trait for self-registering implementations.
//!
//! Wallet and delivery implementations register themselves under a stable
//! name, so configuration can select them without the consuming crate
//! knowing the concrete type.

/// Trait implemented by each implementation's registry marker type.
///
/// `NAME` is the identifier used in configuration files; `Factory` is the
/// implementation-specific factory function signature.
pub trait ImplementationRegistry {
	/// The configuration name of this implementation.
	const NAME: &'static str;
	/// The factory function type producing the implementation.
	type Factory;

	/// Returns the factory function for this implementation.
	fn factory() -> Self::Factory;
}
