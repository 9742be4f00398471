mod create_event;
mod delete_event;
mod export_events;
mod fields;
mod get_event;
mod get_events;
mod get_events_in_range;
mod import_events;
mod search_events;
mod update_event;

use actix_web::web;
use create_event::create_event_controller;
use delete_event::delete_event_controller;
pub use export_events::export_events;
use get_event::get_event_controller;
use get_events::get_events_controller;
use get_events_in_range::get_events_in_range_controller;
pub use import_events::{import_events, ImportSummary};
use search_events::search_events_controller;
use update_event::{patch_event_controller, update_event_controller};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    for path in ["/events", "/events/"] {
        cfg.route(path, web::get().to(get_events_controller));
        cfg.route(path, web::post().to(create_event_controller));
    }

    // Registered before `/events/{event_id}` so they are not taken for an id
    cfg.route("/events/search", web::get().to(search_events_controller));
    cfg.route("/events/range", web::get().to(get_events_in_range_controller));

    cfg.route("/events/{event_id}", web::get().to(get_event_controller));
    cfg.route("/events/{event_id}", web::put().to(update_event_controller));
    cfg.route("/events/{event_id}", web::patch().to(patch_event_controller));
    cfg.route("/events/{event_id}", web::delete().to(delete_event_controller));
}
