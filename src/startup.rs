use std::net::TcpListener;

use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{
    configuration::Settings,
    routes::{default_route, work_route},
};

pub fn run(listener: TcpListener, settings: Settings) -> Result<Server, std::io::Error> {
    let settings = web::Data::new(settings);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(default_route::health)
            .service(work_route::check_work)
            .service(work_route::get_work_data)
            .service(work_route::search_works)
            .app_data(settings.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
