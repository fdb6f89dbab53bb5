//! OpenAPI / Swagger UI Documentation
//!
//! One document per service, served by whichever collection the process runs:
//!
//! - Swagger UI: `http://localhost:8000/docs`
//! - OpenAPI JSON: `http://localhost:8000/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::gateway::handlers::{HealthResponse, RestaurantList, TeaList, WelcomeResponse};
use crate::gateway::types::ErrorBody;
use crate::restaurant::{Restaurant, RestaurantCreate, RestaurantUpdate};
use crate::tea::{Tea, TeaCreate, TeaUpdate};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tea House Catalog API",
        version = "0.1.0",
        description = "CRUD, pagination and category search over the tea catalog.",
        license(name = "MIT")
    ),
    servers((url = "http://localhost:8000", description = "Development")),
    paths(
        crate::gateway::handlers::health::root,
        crate::gateway::handlers::health::health_check,
        crate::gateway::handlers::tea::list_teas,
        crate::gateway::handlers::tea::search_teas,
        crate::gateway::handlers::tea::get_tea,
        crate::gateway::handlers::tea::create_tea,
        crate::gateway::handlers::tea::update_tea,
        crate::gateway::handlers::tea::delete_tea,
    ),
    components(schemas(
        Tea,
        TeaCreate,
        TeaUpdate,
        TeaList,
        ErrorBody,
        HealthResponse,
        WelcomeResponse
    )),
    tags(
        (name = "Teas", description = "Tea catalog"),
        (name = "System", description = "Health checks and service info")
    )
)]
pub struct TeaApiDoc;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Restaurant Directory API",
        version = "0.1.0",
        description = "CRUD, pagination, active filter and cuisine search over restaurants.",
        license(name = "MIT")
    ),
    servers((url = "http://localhost:8000", description = "Development")),
    paths(
        crate::gateway::handlers::health::root,
        crate::gateway::handlers::health::health_check,
        crate::gateway::handlers::restaurant::list_restaurants,
        crate::gateway::handlers::restaurant::list_active_restaurants,
        crate::gateway::handlers::restaurant::search_restaurants,
        crate::gateway::handlers::restaurant::get_restaurant,
        crate::gateway::handlers::restaurant::create_restaurant,
        crate::gateway::handlers::restaurant::update_restaurant,
        crate::gateway::handlers::restaurant::delete_restaurant,
    ),
    components(schemas(
        Restaurant,
        RestaurantCreate,
        RestaurantUpdate,
        RestaurantList,
        ErrorBody,
        HealthResponse,
        WelcomeResponse
    )),
    tags(
        (name = "Restaurants", description = "Restaurant directory"),
        (name = "System", description = "Health checks and service info")
    )
)]
pub struct RestaurantApiDoc;
