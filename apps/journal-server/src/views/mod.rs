//! Server-rendered journal page.
//!
//! One page lists every entry. The create form is always shown; the entry
//! whose id matches `?editing=` is swapped for an edit form.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use journal_core::domain::PostWithUser;

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;max-width:48rem;margin:0 auto;padding:1.5rem}\
nav{display:flex;justify-content:center}nav a{color:inherit;text-decoration:none}\
form.entry{display:flex;flex-direction:column;gap:.6rem;padding:1.5rem;box-shadow:0 1px 3px #0003;border-radius:.25rem}\
input,textarea{padding:8px;border:1px solid #ccc;border-radius:.25rem}\
ul{list-style:none;padding:0}li{background:#f3f4f6;padding:1rem;margin-bottom:1.5rem;border-radius:.25rem}\
.row{display:flex;align-items:center;gap:1rem}.row img{max-width:6rem;border-radius:.25rem}\
.meta{font-size:.875rem;color:#6b7280}.actions{display:flex;gap:.6rem}\
button,.button{padding:8px;border:0;border-radius:.25rem;color:#fff;cursor:pointer;text-decoration:none;font-size:.875rem}\
.post{background:#2563eb}.edit{background:#eab308}.save{background:#16a34a}.delete{background:#dc2626}.cancel{background:#6b7280}";

/// Render the full journal page.
pub fn render_index(posts: &[PostWithUser], editing: Option<i32>) -> String {
    let mut body = String::new();
    body.push_str(&header());
    body.push_str(&create_form());
    body.push_str("<h2>All Entries</h2>\n<ul>\n");
    for entry in posts {
        body.push_str("<li>");
        if editing == Some(entry.post.id) {
            body.push_str(&edit_form(entry));
        } else {
            body.push_str(&entry_card(entry));
        }
        body.push_str("</li>\n");
    }
    body.push_str("</ul>\n");

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">\n\
         <title>Journal</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}</body>\n</html>\n"
    )
}

fn header() -> String {
    "<nav><a href=\"/\"><h1><b>Journal</b></h1></a></nav>\n".to_string()
}

fn create_form() -> String {
    "<h2>New Journal Entry</h2>\n\
     <form class=\"entry\" method=\"post\" action=\"/\" enctype=\"multipart/form-data\">\n\
     <input type=\"hidden\" name=\"_intent\" value=\"create\">\n\
     <input name=\"userName\" placeholder=\"Your name\" required>\n\
     <input name=\"title\" placeholder=\"Title\" required>\n\
     <textarea name=\"content\" placeholder=\"Message\"></textarea>\n\
     <input type=\"file\" name=\"image\" accept=\"image/*\">\n\
     <button type=\"submit\" class=\"post\">Post</button>\n\
     </form>\n"
        .to_string()
}

fn entry_card(entry: &PostWithUser) -> String {
    let post = &entry.post;
    let image = post
        .image_url
        .as_deref()
        .map(|url| format!("<img src=\"{}\" alt=\"Journal image\">", attr(url)))
        .unwrap_or_default();

    format!(
        "<h3>{title}</h3>\n\
         <div class=\"row\">{image}<div>\
         <p>{content}</p>\
         <p class=\"meta\">by {author} at {created}</p>\
         </div></div>\n\
         <div class=\"actions\">\
         <a class=\"button edit\" href=\"/?editing={id}\">Update</a>\
         <form method=\"post\" action=\"/\" enctype=\"multipart/form-data\">\
         <input type=\"hidden\" name=\"id\" value=\"{id}\">\
         <button type=\"submit\" name=\"_intent\" value=\"delete\" class=\"delete\">Delete</button>\
         </form></div>\n",
        title = text(&post.title),
        content = text(post.content.as_deref().unwrap_or_default()),
        author = text(&entry.user.name),
        created = post.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        id = post.id,
    )
}

fn edit_form(entry: &PostWithUser) -> String {
    let post = &entry.post;
    let current_image = post
        .image_url
        .as_deref()
        .map(|url| {
            let file_name = url.rsplit('/').next().unwrap_or(url);
            format!(
                "<div class=\"row\"><img src=\"{}\" alt=\"Uploaded\">\
                 <p class=\"meta\">Current image: <b>{}</b></p></div>\n",
                attr(url),
                text(file_name)
            )
        })
        .unwrap_or_default();

    format!(
        "<form class=\"entry\" method=\"post\" action=\"/\" enctype=\"multipart/form-data\">\n\
         <input type=\"hidden\" name=\"id\" value=\"{id}\">\n\
         <input type=\"hidden\" name=\"_intent\" value=\"update\">\n\
         <input name=\"userName\" value=\"{author}\" placeholder=\"Your name\" required>\n\
         <input name=\"title\" value=\"{title}\" required>\n\
         <textarea name=\"content\">{content}</textarea>\n\
         {current_image}\
         <input type=\"file\" name=\"image\" accept=\"image/*\">\n\
         <div class=\"actions\">\
         <button type=\"submit\" class=\"save\">Save</button>\
         <a class=\"button cancel\" href=\"/\">Cancel</a>\
         </div>\n\
         </form>\n",
        id = post.id,
        author = attr(&entry.user.name),
        title = attr(&post.title),
        content = text(post.content.as_deref().unwrap_or_default()),
    )
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use journal_core::domain::{Post, User};

    use super::*;

    fn entry(id: i32, title: &str, image_url: Option<&str>) -> PostWithUser {
        PostWithUser {
            post: Post {
                id,
                title: title.to_string(),
                content: Some("Dear diary".to_string()),
                image_url: image_url.map(str::to_owned),
                created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
                user_id: 1,
            },
            user: User {
                id: 1,
                name: "Ann".to_string(),
            },
        }
    }

    #[test]
    fn test_lists_entries_with_author_and_time() {
        let html = render_index(&[entry(1, "Hello", None)], None);

        assert!(html.contains("<h3>Hello</h3>"));
        assert!(html.contains("by Ann at 2024-05-01 09:30:00 UTC"));
        assert!(html.contains("href=\"/?editing=1\""));
        assert!(html.contains("value=\"delete\""));
        assert!(!html.contains("value=\"update\""));
    }

    #[test]
    fn test_create_form_is_always_present() {
        let html = render_index(&[], Some(3));
        assert!(html.contains("New Journal Entry"));
        assert!(html.contains("name=\"_intent\" value=\"create\""));
        assert!(html.contains("enctype=\"multipart/form-data\""));
    }

    #[test]
    fn test_editing_entry_renders_form() {
        let posts = [
            entry(1, "Hello", Some("/uploads/1700000000000-cat.png")),
            entry(2, "Other", None),
        ];
        let html = render_index(&posts, Some(1));

        assert!(html.contains("name=\"_intent\" value=\"update\""));
        assert!(html.contains("name=\"title\" value=\"Hello\""));
        assert!(html.contains("Current image: <b>1700000000000-cat.png</b>"));
        assert!(html.contains("<h3>Other</h3>"));
        assert!(!html.contains("<h3>Hello</h3>"));
        assert!(!html.contains("removeImage"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut evil = entry(1, "<script>alert(1)</script>", None);
        evil.user.name = "\"><b>".to_string();

        let html = render_index(&[evil.clone()], None);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));

        let html = render_index(&[evil], Some(1));
        assert!(!html.contains("value=\"\"><b>\""));
    }
}
