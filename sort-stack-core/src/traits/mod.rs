//! Host-side collaborator abstractions

mod card_element;
mod card_factory;

pub use card_element::CardElement;
pub use card_factory::{CardFactory, CardHelpersLoader, ReadyHelpers};
