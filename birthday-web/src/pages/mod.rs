pub mod game;
pub mod landing;
pub mod not_found;

pub use game::GamePage;
pub use landing::{GamesListView, GamesState, LandingPage};
pub use not_found::NotFound;
