// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::{config::AppState, handlers, middleware::auth::auth_guard};

pub fn build_router(app_state: AppState) -> Router {
    // Rotas públicas de autenticação
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    let raw_material_routes = Router::new()
        .route(
            "/",
            get(handlers::inventory::list_materials).post(handlers::inventory::create_material),
        )
        .route("/selectable", get(handlers::inventory::list_selectable))
        .route("/low-stock", get(handlers::inventory::list_low_stock))
        .route(
            "/{id}",
            put(handlers::inventory::update_material).delete(handlers::inventory::delete_material),
        );

    let purchase_routes = Router::new()
        .route(
            "/",
            get(handlers::inventory::list_purchases).post(handlers::inventory::create_purchase),
        )
        .route("/{id}", delete(handlers::inventory::delete_purchase));

    let product_routes = Router::new()
        .route(
            "/",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route("/quote", post(handlers::products::quote))
        .route(
            "/{id}",
            put(handlers::products::update_product).delete(handlers::products::delete_product),
        )
        .route("/{id}/pricing", get(handlers::products::get_pricing));

    let fixed_expense_routes = Router::new()
        .route("/", get(handlers::finance::list_fixed).post(handlers::finance::create_fixed))
        .route("/{id}", put(handlers::finance::update_fixed).delete(handlers::finance::delete_fixed));

    let variable_expense_routes = Router::new()
        .route("/", get(handlers::finance::list_variable).post(handlers::finance::create_variable))
        .route(
            "/{id}",
            put(handlers::finance::update_variable).delete(handlers::finance::delete_variable),
        );

    let employee_routes = Router::new()
        .route("/", get(handlers::staff::list_employees).post(handlers::staff::create_employee))
        .route(
            "/{id}",
            put(handlers::staff::update_employee).delete(handlers::staff::delete_employee),
        );

    let sales_routes = Router::new()
        .route("/", get(handlers::sales::list_sales).post(handlers::sales::create_sale))
        .route("/{id}", put(handlers::sales::update_sale).delete(handlers::sales::delete_sale));

    let dashboard_routes = Router::new()
        .route("/", get(handlers::dashboard::get_metrics))
        .route("/annual", get(handlers::dashboard::get_annual_overview));

    let delivery_routes = Router::new()
        .route("/token", post(handlers::delivery::get_token))
        .route("/sales", get(handlers::delivery::list_sales));

    // Tudo abaixo exige o token do cliente
    let protected_routes = Router::new()
        .route("/clients/me", get(handlers::auth::get_me))
        .nest("/raw-materials", raw_material_routes)
        .nest("/purchases", purchase_routes)
        .nest("/products", product_routes)
        .nest("/fixed-expenses", fixed_expense_routes)
        .nest("/variable-expenses", variable_expense_routes)
        .nest("/employees", employee_routes)
        .nest("/sales", sales_routes)
        .route("/expenses/ratios", get(handlers::finance::get_ratios))
        .nest("/dashboard", dashboard_routes)
        .nest("/delivery", delivery_routes)
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api", protected_routes)
        .with_state(app_state)
}
