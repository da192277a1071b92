pub mod card;
pub mod void;
