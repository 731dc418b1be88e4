use crate::features::categories::services::category_service::Result;
use crate::features::categories::services::{CategoryService, CreateCategory};

/// (name, parent path, description) in creation order; parents precede children
const DEMO_CATALOG: &[(&str, Option<&str>, &str)] = &[
    ("Women", None, ""),
    ("Men", None, ""),
    ("Clothing", Some("women"), "Women's clothing items"),
    ("T-Shirts", Some("women"), "Women's t-shirts collection"),
    ("Dresses", Some("women.clothing"), "Women's dresses collection"),
    ("Casual Dresses", Some("women.clothing.dresses"), "Casual dresses for everyday wear"),
    ("Party Dresses", Some("women.clothing.dresses"), "Elegant dresses for special occasions"),
    ("Printed T-shirts", Some("women.t_shirts"), "T-shirts with printed designs"),
    ("Casual T-Shirts", Some("women.t_shirts"), "Comfortable t-shirts for everyday wear"),
    ("Plain T-Shirts", Some("women.t_shirts"), "Simple, solid-colored t-shirts"),
    ("Footwear", Some("men"), "Men's footwear collection"),
    ("T-Shirts", Some("men"), "Men's t-shirts collection"),
    ("Shirts", Some("men"), "Men's shirts collection"),
    ("Branded", Some("men.footwear"), "Premium branded footwear"),
    ("Non Branded", Some("men.footwear"), "Affordable non-branded footwear"),
    ("Printed T-shirts", Some("men.t_shirts"), "T-shirts with printed designs"),
    ("Casual T-Shirts", Some("men.t_shirts"), "Comfortable t-shirts for everyday wear"),
    ("Plain T-Shirts", Some("men.t_shirts"), "Simple, solid-colored t-shirts"),
    ("Party Shirts", Some("men.shirts"), "Stylish shirts for parties and events"),
    ("Casual Shirts", Some("men.shirts"), "Comfortable shirts for everyday wear"),
    ("Plain Shirts", Some("men.shirts"), "Simple, solid-colored shirts"),
];

/// Replace every stored category with the demo fashion catalog.
///
/// Returns the number of categories created.
pub async fn seed_demo_catalog(service: &CategoryService) -> Result<usize> {
    let cleared = service.clear().await?;
    tracing::info!("Cleared {} existing categories", cleared);

    for (name, parent_path, description) in DEMO_CATALOG {
        service
            .create(CreateCategory {
                name: name.to_string(),
                parent_path: parent_path.map(str::to_string),
                description: Some(description.to_string()),
                ..Default::default()
            })
            .await?;
    }

    tracing::info!("Seeded {} demo categories", DEMO_CATALOG.len());
    Ok(DEMO_CATALOG.len())
}
