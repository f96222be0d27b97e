pub mod home;
pub mod navigation;
pub mod nearest_parks;
pub mod records_list;
pub mod register;
pub mod select_spot;
pub mod settings;

pub use home::HomeScreen;
pub use navigation::NavigationBar;
pub use nearest_parks::NearestParksScreen;
pub use records_list::SightingListScreen;
pub use register::RegisterScreen;
pub use select_spot::SelectSpotScreen;
pub use settings::SettingsScreen;
