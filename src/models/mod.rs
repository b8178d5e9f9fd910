pub mod activity;
pub mod cache;
pub mod clock;
pub mod form;
pub mod message;
pub mod view;
