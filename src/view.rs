//! Plain-text rendering of slot states for the command-line driver.

use crate::model::{Address, Advert, Category, ListResponse, Logger, Pagination, Profile, User};
use crate::{dispatch, RequestState};

/// Render any state: a spinner line, the success body, or the error with a
/// retry hint. `Idle` renders nothing.
pub fn render<T>(state: &RequestState<T>, body: impl FnOnce(&T) -> String) -> Option<String> {
    dispatch(
        state,
        || "Loading…".to_string(),
        body,
        |message| format!("Error: {}\nRun the command again to retry.", message),
    )
}

pub fn advert_line(advert: &Advert) -> String {
    let price = advert
        .price
        .map(|p| format!("{:.2}", p))
        .unwrap_or_else(|| "-".to_string());
    let category = advert
        .category
        .as_ref()
        .map(|c| c.name.as_str())
        .unwrap_or("uncategorised");
    format!(
        "#{:<5} {:<40} {:>10}  [{}]  {}",
        advert.id, advert.title, price, category, advert.document_id
    )
}

pub fn advert_list(page: &ListResponse<Advert>) -> String {
    if page.data.is_empty() {
        return "No adverts.".to_string();
    }
    let mut lines: Vec<String> = page.data.iter().map(advert_line).collect();
    lines.push(pagination_line(&page.meta.pagination));
    lines.join("\n")
}

pub fn advert_detail(advert: &Advert) -> String {
    let mut lines = vec![advert_line(advert)];
    if let Some(description) = &advert.description {
        lines.push(String::new());
        lines.push(description.clone());
    }
    if let Some(location) = &advert.location {
        lines.push(format!("Location: {}", location));
    }
    if let Some(cover) = &advert.cover {
        lines.push(format!("Cover: {}", cover.thumbnail_url()));
    }
    lines.join("\n")
}

pub fn category_list(page: &ListResponse<Category>) -> String {
    page.data
        .iter()
        .map(|c| format!("{:<24} {}", c.name, c.document_id))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn address_line(address: &Address) -> String {
    let mut parts = vec![address.street.clone(), address.city.clone()];
    parts.extend(address.postal_code.clone());
    parts.extend(address.country.clone());
    format!("{}  ({})", parts.join(", "), address.document_id)
}

pub fn profile_detail(profile: &Profile) -> String {
    let mut lines = vec![format!("{} ({})", profile.display_name(), profile.document_id)];
    if let Some(phone) = &profile.phone {
        lines.push(format!("Phone: {}", phone));
    }
    lines.push(format!("Addresses ({}):", profile.addresses.len()));
    lines.extend(profile.addresses.iter().map(|a| format!("  {}", address_line(a))));
    lines.push(format!("Adverts ({}):", profile.adverts.len()));
    lines.extend(profile.adverts.iter().map(|a| format!("  {}", advert_line(a))));
    lines.join("\n")
}

pub fn user_detail(user: &User) -> String {
    let mut line = format!("{} <{}> (user #{})", user.username, user.email, user.id);
    if let Some(profile) = &user.profile {
        line.push_str(&format!("\nProfile: {}", profile.document_id));
    }
    line
}

pub fn logger_list(page: &ListResponse<Logger>) -> String {
    if page.data.is_empty() {
        return "No entries.".to_string();
    }
    let mut lines: Vec<String> = page
        .data
        .iter()
        .map(|entry| {
            let image = entry
                .image
                .as_ref()
                .map(|i| i.thumbnail_url().to_string())
                .unwrap_or_default();
            format!("#{:<5} {:<40} {}", entry.id, entry.title, image)
        })
        .collect();
    lines.push(pagination_line(&page.meta.pagination));
    lines.join("\n")
}

fn pagination_line(pagination: &Pagination) -> String {
    format!(
        "page {}/{} ({} total)",
        pagination.page, pagination.page_count, pagination.total
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_error_has_retry_hint() {
        let state: RequestState<u8> = RequestState::error("Resource not found");
        let out = render(&state, |_| unreachable!()).unwrap();
        assert!(out.starts_with("Error: Resource not found"));
        assert!(out.contains("retry"));
    }

    #[test]
    fn render_idle_is_empty() {
        assert!(render(&RequestState::<u8>::Idle, |v| v.to_string()).is_none());
    }

    #[test]
    fn empty_list_message() {
        let page: ListResponse<Advert> = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert_eq!(advert_list(&page), "No adverts.");
    }
}
