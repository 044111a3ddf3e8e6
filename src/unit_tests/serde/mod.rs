mod dismissed_popups_bucket;
mod events_response;
mod popup;
