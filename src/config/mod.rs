/// JSON player configuration.
pub mod player;
