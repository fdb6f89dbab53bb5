pub mod health;
pub mod restaurant;
pub mod tea;

pub use health::{HealthResponse, VERSION, WelcomeResponse, health_check, root};
pub use restaurant::{
    RestaurantList, create_restaurant, delete_restaurant, get_restaurant,
    list_active_restaurants, list_restaurants, search_restaurants, update_restaurant,
};
pub use tea::{TeaList, create_tea, delete_tea, get_tea, list_teas, search_teas, update_tea};
