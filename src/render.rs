pub mod card;
pub mod composite;
pub mod pipeline;
