//! Seed the product catalog.
//!
//! Mirrors a production catalog drop: clears the product table (unless told
//! otherwise) and inserts the standard innerwear set.

use rust_decimal::Decimal;
use tracing::info;

use loomwear_core::Category;
use loomwear_storefront::db::{self, NewProduct, ProductRepository};

/// Seed the catalog.
///
/// # Arguments
///
/// * `keep_existing` - If false (the default), clear existing products first.
///
/// # Errors
///
/// Returns an error if the database URL is missing or a query fails.
pub async fn run(keep_existing: bool) -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let database_url = super::database_url()?;
    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let repo = ProductRepository::new(&pool);

    if !keep_existing {
        let removed = repo.delete_all().await?;
        info!(removed, "Cleared existing products");
    }

    let products = catalog_products();
    let total = products.len();
    for product in &products {
        repo.insert(product).await?;
    }

    info!("Seeding complete!");
    info!("  Products inserted: {total}");
    Ok(())
}

fn item(
    name: &str,
    price: i64,
    description: &str,
    image: &str,
    category: Category,
    sizes: &[&str],
) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        price: Decimal::new(price, 0),
        description: description.to_string(),
        image: image.to_string(),
        category,
        subcategory: "Innerwear".to_string(),
        in_stock: true,
        sizes: sizes.iter().map(ToString::to_string).collect(),
    }
}

/// The standard catalog seed set.
fn catalog_products() -> Vec<NewProduct> {
    vec![
        item(
            "Classic Cotton Briefs",
            299,
            "Comfortable cotton briefs with elastic waistband. Soft, breathable fabric for all-day comfort.",
            "https://images.unsplash.com/photo-1586363104862-3a5e2ab60d99?w=400&h=400&fit=crop",
            Category::Men,
            &["S", "M", "L", "XL", "XXL"],
        ),
        item(
            "Premium Boxer Shorts",
            449,
            "Relaxed fit boxer shorts made from premium cotton blend. Perfect for lounging and everyday wear.",
            "https://images.unsplash.com/photo-1594938298603-c8148c4dae35?w=400&h=400&fit=crop",
            Category::Men,
            &["S", "M", "L", "XL"],
        ),
        item(
            "Sports Performance Vest",
            399,
            "Moisture-wicking vest designed for active lifestyles. Lightweight and quick-drying fabric.",
            "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?w=400&h=400&fit=crop",
            Category::Men,
            &["S", "M", "L", "XL"],
        ),
        item(
            "Seamless Cotton Bralette",
            549,
            "Ultra-soft seamless bralette with removable padding. Ideal for everyday comfort and support.",
            "https://images.unsplash.com/photo-1620799140408-edc6dcb6d633?w=400&h=400&fit=crop",
            Category::Women,
            &["XS", "S", "M", "L", "XL"],
        ),
        item(
            "Lace Trim Camisole",
            499,
            "Elegant camisole with delicate lace trim. Perfect layering piece with adjustable straps.",
            "https://images.unsplash.com/photo-1564557287817-3785e38ec1f5?w=400&h=400&fit=crop",
            Category::Women,
            &["XS", "S", "M", "L"],
        ),
        item(
            "Cotton Hipster Panties (3-Pack)",
            599,
            "Set of 3 comfortable cotton hipster panties. Tagless design with covered elastic waistband.",
            "https://images.unsplash.com/photo-1618354691373-d851c5c3a990?w=400&h=400&fit=crop",
            Category::Women,
            &["XS", "S", "M", "L", "XL"],
        ),
        item(
            "Kids Cotton Vest (2-Pack)",
            349,
            "Soft cotton vests perfect for kids. Comfortable fit with durable stitching for active play.",
            "https://images.unsplash.com/photo-1519238263530-99bdd11df2ea?w=400&h=400&fit=crop",
            Category::Kids,
            &["2-4Y", "4-6Y", "6-8Y", "8-10Y"],
        ),
        item(
            "Kids Printed Briefs (5-Pack)",
            449,
            "Fun printed briefs for kids in assorted colors. Soft elastic waistband for comfort.",
            "https://images.unsplash.com/photo-1622290291468-a28f7a7dc6a8?w=400&h=400&fit=crop",
            Category::Kids,
            &["2-4Y", "4-6Y", "6-8Y", "8-10Y", "10-12Y"],
        ),
        item(
            "Thermal Long Johns",
            799,
            "Warm thermal long johns for cold weather. Brushed inner fabric for extra warmth and comfort.",
            "https://images.unsplash.com/photo-1489987707025-afc232f7ea0f?w=400&h=400&fit=crop",
            Category::Unisex,
            &["S", "M", "L", "XL", "XXL"],
        ),
        item(
            "Bamboo Fiber Tank Top",
            599,
            "Eco-friendly bamboo fiber tank top. Naturally antibacterial and incredibly soft on skin.",
            "https://images.unsplash.com/photo-1503341504253-dff4815485f1?w=400&h=400&fit=crop",
            Category::Unisex,
            &["XS", "S", "M", "L", "XL"],
        ),
        item(
            "Trunk Style Underwear",
            379,
            "Modern trunk style underwear with supportive fit. Stretchy fabric moves with you all day.",
            "https://images.unsplash.com/photo-1591195853828-11db59a44f6b?w=400&h=400&fit=crop",
            Category::Men,
            &["S", "M", "L", "XL"],
        ),
        item(
            "High-Waist Shaping Brief",
            649,
            "Smoothing high-waist brief with light shaping. Comfortable compression for a streamlined look.",
            "https://images.unsplash.com/photo-1594938298603-c8148c4dae35?w=400&h=400&fit=crop",
            Category::Women,
            &["S", "M", "L", "XL", "XXL"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_set_shape() {
        let products = catalog_products();
        assert_eq!(products.len(), 12);

        for product in &products {
            assert!(!product.name.is_empty());
            assert!(product.price > Decimal::ZERO);
            assert!(!product.sizes.is_empty());
            assert!(product.in_stock);
            assert_eq!(product.subcategory, "Innerwear");
        }
    }

    #[test]
    fn test_seed_set_names_are_unique() {
        let products = catalog_products();
        let mut names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        let before = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), before);
    }

    #[test]
    fn test_seed_set_covers_every_category() {
        let products = catalog_products();
        for category in Category::ALL {
            assert!(
                products.iter().any(|p| p.category == category),
                "no seed product in category {category}"
            );
        }
    }
}
