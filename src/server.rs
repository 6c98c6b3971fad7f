use crate::config::Config;
use crate::handler;
use std::sync::Arc;

pub async fn start_server(config: Config, port: u16, wonky_percentage: u8) {
    let routes = handler::routes(Arc::new(config.endpoints), wonky_percentage);

    warp::serve(routes).run(([0, 0, 0, 0], port)).await;
}
