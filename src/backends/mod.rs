//! Backend implementations of the [`ModelGateway`](crate::chat::ModelGateway) trait.

pub mod google;
