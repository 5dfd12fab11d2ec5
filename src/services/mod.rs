pub mod auction;
pub mod auction_desk;
pub mod debounce;
pub mod gateway;
pub mod listing;
pub mod player_formatter;
pub mod provider;
pub mod registration;
pub mod websocket;
