use crate::services::catalog::NewProduct;

#[allow(clippy::too_many_arguments)]
fn item(
    name: &str,
    description: &str,
    price: f64,
    image: &str,
    category: &str,
    stock: i32,
    rating: f64,
    num_reviews: i32,
    brand: &str,
) -> NewProduct {
    NewProduct {
        name: name.to_owned(),
        description: description.to_owned(),
        price,
        image: Some(format!(
            "https://images.pexels.com/photos/{image}?auto=compress&cs=tinysrgb&w=500&h=500&fit=crop"
        )),
        category: category.to_owned(),
        stock,
        rating,
        num_reviews,
        brand: Some(brand.to_owned()),
    }
}

pub fn starter_products() -> Vec<NewProduct> {
    vec![
        item(
            "Wireless Bluetooth Headphones",
            "High-quality wireless headphones with noise cancellation and long battery life.",
            79.99,
            "3394651/pexels-photo-3394651.jpeg",
            "Electronics",
            50,
            4.5,
            120,
            "TechSound",
        ),
        item(
            "Smartphone 128GB",
            "Latest smartphone with advanced camera system and fast processor.",
            699.99,
            "788946/pexels-photo-788946.jpeg",
            "Electronics",
            30,
            4.8,
            250,
            "PhoneMax",
        ),
        item(
            "Laptop 15 inch",
            "Powerful laptop perfect for work and gaming.",
            1299.99,
            "18105/pexels-photo.jpg",
            "Electronics",
            20,
            4.7,
            180,
            "LapTopPro",
        ),
        item(
            "Running Shoes",
            "Comfortable running shoes with excellent support.",
            89.99,
            "1598505/pexels-photo-1598505.jpeg",
            "Fashion",
            75,
            4.6,
            95,
            "RunFast",
        ),
        item(
            "Casual T-Shirt",
            "Soft and comfortable cotton t-shirt in various colors.",
            19.99,
            "6311392/pexels-photo-6311392.jpeg",
            "Fashion",
            100,
            4.3,
            200,
            "ComfortWear",
        ),
        item(
            "Coffee Maker",
            "Automatic coffee maker with programmable settings.",
            49.99,
            "129207/pexels-photo-129207.jpeg",
            "Home & Kitchen",
            40,
            4.4,
            150,
            "BrewMaster",
        ),
        item(
            "Yoga Mat",
            "Non-slip yoga mat for comfortable exercise sessions.",
            29.99,
            "416475/pexels-photo-416475.jpeg",
            "Sports",
            60,
            4.5,
            80,
            "FitLife",
        ),
        item(
            "Backpack",
            "Durable backpack with multiple compartments.",
            59.99,
            "2701782/pexels-photo-2701782.jpeg",
            "Fashion",
            45,
            4.2,
            110,
            "TravelGear",
        ),
        item(
            "Desk Lamp",
            "LED desk lamp with adjustable brightness.",
            34.99,
            "1413412/pexels-photo-1413412.jpeg",
            "Home & Kitchen",
            55,
            4.3,
            90,
            "BrightLight",
        ),
        item(
            "Wireless Mouse",
            "Ergonomic wireless mouse with long battery life.",
            24.99,
            "2115256/pexels-photo-2115256.jpeg",
            "Electronics",
            80,
            4.4,
            140,
            "ClickTech",
        ),
        item(
            "Water Bottle",
            "Stainless steel water bottle that keeps drinks cold.",
            15.99,
            "3735214/pexels-photo-3735214.jpeg",
            "Sports",
            90,
            4.6,
            175,
            "HydroLife",
        ),
        item(
            "Watch",
            "Stylish watch with leather strap and water resistance.",
            149.99,
            "997910/pexels-photo-997910.jpeg",
            "Fashion",
            35,
            4.7,
            65,
            "TimeStyle",
        ),
    ]
}
