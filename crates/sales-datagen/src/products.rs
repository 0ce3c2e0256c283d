//! Synthetic products in the flat products layout.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sales_core::money::Money;
use sales_core::profit::round2;
use sales_core::{padded_key, ProductId};
use sales_etl::records::ProductRecord;

use crate::sampling::pick;

const CATEGORIES: [(&str, [&str; 5]); 10] = [
    ("Electronics", ["Smartphones", "Laptops", "Tablets", "Accessories", "Audio"]),
    ("Clothing", ["Shirts", "Pants", "Dresses", "Shoes", "Accessories"]),
    ("Home & Garden", ["Furniture", "Decor", "Appliances", "Garden Tools", "Lighting"]),
    ("Sports", ["Fitness Equipment", "Outdoor Gear", "Team Sports", "Water Sports", "Winter Sports"]),
    ("Books", ["Fiction", "Non-Fiction", "Educational", "Children's", "Reference"]),
    ("Toys", ["Action Figures", "Board Games", "Educational", "Electronic", "Outdoor"]),
    ("Health & Beauty", ["Skincare", "Makeup", "Hair Care", "Supplements", "Personal Care"]),
    ("Automotive", ["Parts", "Accessories", "Tools", "Electronics", "Maintenance"]),
    ("Tools", ["Hand Tools", "Power Tools", "Hardware", "Measuring", "Safety"]),
    ("Food & Beverage", ["Snacks", "Beverages", "Ingredients", "Organic", "International"]),
];

const BRANDS: [&str; 10] = [
    "TechPro",
    "StyleMax",
    "HomeComfort",
    "SportElite",
    "BookWorld",
    "PlayTime",
    "BeautyPlus",
    "AutoMax",
    "ToolCraft",
    "FreshTaste",
];

const TIERS: [&str; 5] = ["Pro", "Elite", "Classic", "Premium", "Basic"];

/// Cost range in dollars for a category.
fn cost_range(category: &str) -> (f64, f64) {
    match category {
        "Electronics" => (50.0, 800.0),
        "Automotive" | "Tools" => (20.0, 300.0),
        "Clothing" | "Health & Beauty" => (10.0, 150.0),
        _ => (5.0, 100.0),
    }
}

/// Generate `n` products with ids `PROD_1000` upward.
///
/// Prices carry a 20-60 % markup on cost; `margin` records that markup in
/// percent.
pub fn generate_additional_products(n: usize, seed: u64) -> Vec<ProductRecord> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..n)
        .map(|i| {
            let (category, subcategories) = pick(&mut rng, &CATEGORIES);
            let subcategory = *pick(&mut rng, subcategories);
            let brand = *pick(&mut rng, &BRANDS);

            let (low, high) = cost_range(category);
            let cost = Money::usd(rng.gen_range(low..high));
            let markup: f64 = rng.gen_range(0.2..0.6);
            let price = cost.multiply_decimal(1.0 + markup);
            let tier = *pick(&mut rng, &TIERS);

            ProductRecord {
                product_id: ProductId::new(padded_key("PROD", 1000 + i as u64, 4)),
                name: Some(format!("{brand} {subcategory} {tier}")),
                category: Some(category.to_string()),
                subcategory: Some(subcategory.to_string()),
                brand: Some(brand.to_string()),
                cost: Some(cost),
                price: Some(price),
                margin: Some(round2(markup * 100.0)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_SEED;

    #[test]
    fn test_products_respect_category_ranges() {
        let products = generate_additional_products(200, DEFAULT_SEED);
        assert_eq!(products.len(), 200);
        assert_eq!(products[0].product_id.as_str(), "PROD_1000");
        assert_eq!(products[199].product_id.as_str(), "PROD_1199");

        for p in &products {
            let category = p.category.as_deref().unwrap();
            let (low, high) = cost_range(category);
            let cost = p.cost.unwrap().to_decimal();
            assert!(cost >= low && cost <= high, "{category}: {cost}");

            let margin = p.margin.unwrap();
            assert!((20.0..=60.0).contains(&margin));
            assert!(p.price.unwrap() > p.cost.unwrap());

            let subcategory = p.subcategory.as_deref().unwrap();
            let (_, subs) = CATEGORIES.iter().find(|(c, _)| *c == category).unwrap();
            assert!(subs.contains(&subcategory));
            assert!(p.name.as_deref().unwrap().starts_with(p.brand.as_deref().unwrap()));
        }
    }

    #[test]
    fn test_products_deterministic() {
        assert_eq!(
            generate_additional_products(20, 1),
            generate_additional_products(20, 1)
        );
        assert_ne!(
            generate_additional_products(20, 1),
            generate_additional_products(20, 2)
        );
    }
}
