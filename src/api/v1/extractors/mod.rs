/*!
 * Request extractors
 *
 * Public API:
 * - Identity
 */
mod identity;

pub use identity::Identity;
