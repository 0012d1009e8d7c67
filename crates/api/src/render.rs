//! Server-rendered HTML for the listing page.

use std::fmt::Write;

use picshelf_core::format::{escape_html, human_size};
use picshelf_core::upload::ALLOWED_EXTENSIONS;
use picshelf_db::models::image::ImageRecord;

use crate::flash::Flash;

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;max-width:960px;margin:2rem auto;padding:0 1rem;color:#222}\
.flash{padding:.75rem 1rem;border-radius:4px;margin-bottom:1rem}\
.flash.success{background:#e6f4ea;color:#1e4620}\
.flash.error{background:#fdecea;color:#611a15}\
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(200px,1fr));gap:1rem}\
.card{border:1px solid #ddd;border-radius:4px;padding:.5rem}\
.card img{width:100%;height:160px;object-fit:cover}\
.meta{font-size:.85rem;color:#555}";

/// Render the gallery page: upload form, optional notice, image grid.
pub fn index_page(images: &[ImageRecord], flash: Option<&Flash>, max_upload_bytes: usize) -> String {
    let mut html = String::with_capacity(2048 + images.len() * 512);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Image Gallery</title>\n");
    let _ = writeln!(html, "<style>{STYLE}</style>\n</head>\n<body>");
    html.push_str("<h1>Image Gallery</h1>\n");

    if let Some(flash) = flash {
        let _ = writeln!(
            html,
            "<div class=\"flash {}\">{}</div>",
            flash.kind.as_str(),
            escape_html(&flash.message)
        );
    }

    let accept: Vec<String> = ALLOWED_EXTENSIONS.iter().map(|ext| format!(".{ext}")).collect();
    let _ = writeln!(
        html,
        "<form action=\"/upload\" method=\"post\" enctype=\"multipart/form-data\">\
         <input type=\"file\" name=\"file\" accept=\"{}\" required> \
         <button type=\"submit\">Upload</button> \
         <span class=\"meta\">JPG, JPEG or PNG, up to {}</span></form>",
        accept.join(","),
        human_size(max_upload_bytes as i64)
    );

    if images.is_empty() {
        html.push_str("<p class=\"meta\">No images uploaded yet.</p>\n");
    } else {
        let _ = writeln!(html, "<h2>Uploaded images ({})</h2>", images.len());
        html.push_str("<div class=\"grid\">\n");
        for image in images {
            write_card(&mut html, image);
        }
        html.push_str("</div>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn write_card(html: &mut String, image: &ImageRecord) {
    let filename = escape_html(&image.filename);
    let original = escape_html(&image.original_name);
    let size = image
        .file_size
        .map(human_size)
        .unwrap_or_else(|| "unknown size".to_string());

    let _ = writeln!(
        html,
        "<div class=\"card\">\
         <a href=\"/uploads/{filename}\"><img src=\"/uploads/{filename}\" alt=\"{original}\"></a>\
         <div class=\"name\">{original}</div>\
         <div class=\"meta\">{} &middot; {}</div>\
         <form action=\"/delete/{}\" method=\"post\"><button type=\"submit\">Delete</button></form>\
         </div>",
        escape_html(&image.upload_time),
        size,
        image.id
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, original_name: &str) -> ImageRecord {
        ImageRecord {
            id,
            filename: format!("20240101_000000_{id}.png"),
            original_name: original_name.to_string(),
            file_path: format!("/tmp/uploads/20240101_000000_{id}.png"),
            upload_time: "2024-01-01 00:00:00".to_string(),
            file_size: Some(2048),
        }
    }

    #[test]
    fn empty_gallery_says_so() {
        let html = index_page(&[], None, 1024);
        assert!(html.contains("No images uploaded yet."));
        assert!(!html.contains("class=\"flash"));
    }

    #[test]
    fn cards_link_to_file_and_delete_route() {
        let html = index_page(&[record(7, "cat.png")], None, 1024);
        assert!(html.contains("src=\"/uploads/20240101_000000_7.png\""));
        assert!(html.contains("action=\"/delete/7\""));
        assert!(html.contains("2.0 KB"));
    }

    #[test]
    fn original_names_are_escaped() {
        let html = index_page(&[record(1, "<script>.png")], None, 1024);
        assert!(html.contains("&lt;script&gt;.png"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn flash_is_rendered_with_its_kind() {
        let flash = Flash::error("Invalid filename.");
        let html = index_page(&[], Some(&flash), 1024);
        assert!(html.contains("<div class=\"flash error\">Invalid filename.</div>"));
    }
}
