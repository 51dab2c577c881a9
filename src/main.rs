//! Demo: runs an auto shop through a day of trading and prints what happened.
//!
//! Any store error is printed and the process exits with status 1.

use auto_shop::lifecycle::{setup_tracing, ShopConfig};
use auto_shop::model::{Buyer, CarDetails, OrderCreate, ProductInfo, ProductKind, ProductType};
use auto_shop::store::{Store, StoreError};
use std::process::ExitCode;
use tracing::{error, info, Instrument};

const ECOSPORT_DESCRIPTION: &str = "The EcoSport is easy to drive and spacious inside. \
    The 1.0-litre petrol engine is a popular choice because of its efficiency.";
const ECOSPORT_IMAGES: [&str; 2] = [
    "https://uks-cdn.pinewooddms.com/b04b90f8-2e99-463d-a023-7e3c771fb388/vehicles/1935a96a-3bb8-485e-affc-132707e733c1.jpg",
    "https://uks-cdn.pinewooddms.com/b04b90f8-2e99-463d-a023-7e3c771fb388/vehicles/4cb99337-5c1b-4f0e-9bb7-3683f23520de.jpg",
];

const SHADOW_LIGHT_NAME: &str = "Toyota Shadow Logo Led Light (For 4 Doors)";
const SHADOW_LIGHT_IMAGE: &str =
    "https://ng.jumia.is/unsafe/fit-in/500x500/filters:fill(white)/product/74/552546/1.jpg";

fn ecosport(color: &str) -> ProductInfo {
    let details = CarDetails::new("Ford", "1.5 Zetec 5dr 2016", color).with_year("2016");
    let mut info = ProductInfo::new("Ford Ecosport", "Car", 5_000_000.0);
    for image in ECOSPORT_IMAGES {
        info = info.with_image(image);
    }
    info.with_category("Used Cars")
        .with_description(ECOSPORT_DESCRIPTION)
        .with_specification(
            "Key Features",
            [
                "Bluetooth",
                "Climate Control",
                "Air Conditioning",
                "Ask for a Test Drive Today",
                "24 Month Guarantee Available",
                "2 x Keys with car",
            ],
        )
        .with_specification("Engine", ["Auto", "Petrol"])
        .with_kind(ProductKind::Car(details))
}

fn shadow_light() -> ProductInfo {
    ProductInfo::new(SHADOW_LIGHT_NAME, "Car Accessory", 14_000.0)
        .with_category("Led Lights")
        .with_description(
            "TOYOTA LED HOLOGRAM SAFETY LIGHTS (free batteries included): stay safe at night \
             when stepping out of your car in poorly lit areas.",
        )
        .with_image(SHADOW_LIGHT_IMAGE)
        .with_specification(
            "Key Features",
            ["Toyota LED Hologram Safety Lights, Free batteries included"],
        )
        .with_kind(ProductKind::Accessory)
}

async fn run(config: &ShopConfig) -> Result<(), StoreError> {
    let shop = Store::from_config(config);
    let name = shop.name();
    let currency = config.currency.as_str();
    let car = ProductType::from("Car");
    let accessory = ProductType::from("Car Accessory");

    let ids = async {
        info!("Stocking the shop");
        shop.add_products(vec![ecosport("yellow"), ecosport("black"), shadow_light()])
            .await
    }
    .instrument(tracing::info_span!("stocking"))
    .await?;

    let available = shop.available_products(None).await;
    println!(
        "{name} has {} products available that cost a total of {:.2} {currency}",
        available.len(),
        available.total
    );

    let span = tracing::info_span!("order_processing");
    let order_id = async {
        info!("Selling a car and an accessory");
        let buyer = Buyer::new(
            "Philemon",
            "No 21 Alt_School Africa street, Banana Island, Lagos",
            5_014_000.0,
        );
        shop.sell(OrderCreate::new(buyer, [ids[0], ids[2]])).await
    }
    .instrument(span)
    .await?;
    info!(%order_id, "Order processed successfully");

    let sold = shop.sold_products(None).await;
    println!(
        "{name} has sold {} products at {:.2} {currency}",
        sold.len(),
        sold.total
    );

    let sold_cars = shop.sold_products(Some(&car)).await;
    println!(
        "{name} has sold {} {car} at {:.2} {currency}",
        sold_cars.len(),
        sold_cars.total
    );

    let available_cars = shop.available_products(Some(&car)).await;
    println!(
        "{name} has {} {car} available that cost a total of {:.2} {currency}",
        available_cars.len(),
        available_cars.total
    );

    let orders = shop.orders().await;
    println!(
        "{name} has processed {} orders totalling {:.2} {currency}",
        orders.len(),
        orders.total_paid
    );

    for product_type in [&car, &accessory] {
        let in_stock = shop.in_stock(product_type).await;
        println!("{name} has a {product_type} in stock: {in_stock}");
    }

    let available = shop.product(ids[0]).await.is_some();
    println!("Product with id {} is available: {available}", ids[0]);

    let spare_parts = ProductType::from("Spare Parts");
    shop.set_product_type_support(spare_parts, true).await?;
    shop.set_product_type_support(accessory, false).await?;
    for (product_type, enabled) in shop.supported_product_types().await {
        println!("{name} currently has support for {product_type}: {enabled}");
    }

    let deleted = shop.delete_products(&ids).await?;
    println!("Deleted {deleted} products from {name}");

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_tracing();

    let config = match ShopConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    info!(store = %config.name, "Starting demo");
    match run(&config).await {
        Ok(()) => {
            info!("Demo completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Demo failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
