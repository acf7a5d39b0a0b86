//! HTML rendering for the browser views.
//!
//! Pages are assembled from string fragments; every user-supplied value goes
//! through [`escape`] before it reaches the markup.

use crate::domain::{User, UserId};

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n{body}</body>\n</html>\n",
        title = escape(title),
    )
}

fn error_banner(error: Option<&str>) -> String {
    error
        .map(|message| format!("<p class=\"error\" role=\"alert\">{}</p>\n", escape(message)))
        .unwrap_or_default()
}

/// Which form is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// New user form posting to `/users`.
    Create,
    /// Edit form for an existing user.
    Edit(UserId),
}

impl FormMode {
    fn title(self) -> &'static str {
        match self {
            Self::Create => "New user",
            Self::Edit(_) => "Edit user",
        }
    }

    fn action(self) -> String {
        match self {
            Self::Create => "/users".to_owned(),
            Self::Edit(id) => format!("/users/{id}"),
        }
    }

    fn submit_label(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Edit(_) => "Save",
        }
    }
}

/// Raw form values echoed back into inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    /// Name input value.
    pub name: String,
    /// Email input value.
    pub email: String,
}

impl From<&User> for FormValues {
    fn from(user: &User) -> Self {
        Self {
            name: user.name().to_string(),
            email: user.email().to_string(),
        }
    }
}

/// Table of users with edit links and delete buttons.
pub fn list_page(users: &[User], error: Option<&str>) -> String {
    let mut body = error_banner(error);
    body.push_str("<p><a href=\"/users/new\">New user</a></p>\n");

    if users.is_empty() {
        body.push_str("<p>No users yet.</p>\n");
        return layout("Users", &body);
    }

    body.push_str(
        "<table>\n<thead><tr><th>ID</th><th>Name</th><th>Email</th><th></th></tr></thead>\n<tbody>\n",
    );
    let rows: String = users
        .iter()
        .map(|user| {
            format!(
                "<tr><td>{id}</td><td>{name}</td><td>{email}</td><td>\
                 <a href=\"/users/{id}/edit\">Edit</a> \
                 <form method=\"post\" action=\"/users/{id}/delete\" style=\"display:inline\">\
                 <button type=\"submit\">Delete</button></form></td></tr>\n",
                id = user.id(),
                name = escape(user.name().as_ref()),
                email = escape(user.email().as_ref()),
            )
        })
        .collect();
    body.push_str(&rows);
    body.push_str("</tbody>\n</table>\n");
    layout("Users", &body)
}

/// Create or edit form, pre-filled with `values`.
pub fn form_page(mode: FormMode, values: &FormValues, error: Option<&str>) -> String {
    let body = format!(
        "{banner}<form method=\"post\" action=\"{action}\">\n\
         <label>Name <input type=\"text\" name=\"name\" value=\"{name}\" required></label>\n\
         <label>Email <input type=\"email\" name=\"email\" value=\"{email}\" required></label>\n\
         <button type=\"submit\">{submit}</button>\n\
         </form>\n<p><a href=\"/users\">Back to list</a></p>\n",
        banner = error_banner(error),
        action = mode.action(),
        name = escape(&values.name),
        email = escape(&values.email),
        submit = mode.submit_label(),
    );
    layout(mode.title(), &body)
}

/// Page shown when the requested user does not exist.
pub fn not_found_page(message: &str) -> String {
    let body = format!(
        "{}<p><a href=\"/users\">Back to list</a></p>\n",
        error_banner(Some(message))
    );
    layout("Not found", &body)
}
