use actix_web::web::{self};

pub mod routes {
    pub mod sub;
}

pub mod services {
    pub mod sub;
}

pub mod dtos {
    pub mod sub;
}

/// Public plan catalog.
pub fn mount_plans() -> actix_web::Scope {
    web::scope("/sub").service(routes::sub::get_plans)
}

/// Routes for the authenticated user's own subscription.
pub fn mount_subs() -> actix_web::Scope {
    web::scope("/sub")
        .service(routes::sub::post_provision)
        .service(routes::sub::get_current)
        .service(routes::sub::get_usage)
        .service(routes::sub::get_capacity)
}
