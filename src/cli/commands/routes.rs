use crate::api::sitemap::ROUTES;

pub fn cmd_routes() {
    println!("{:<8} PATH", "METHOD");
    println!("{:-<60}", "");
    for route in ROUTES {
        println!("{:<8} {}", route.method, route.path);
    }
}
