pub mod health;
pub mod todos;
pub mod users;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(users::register)
            .service(users::login)
            .service(users::refresh)
            .service(users::me),
    )
    .service(
        web::scope("/todos")
            .service(todos::create_todo)
            .service(todos::list_todos)
            .service(todos::get_todo)
            .service(todos::update_todo)
            .service(todos::delete_todo),
    );
}
