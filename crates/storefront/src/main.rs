//! Tahadu Storefront - terminal shopping client.
//!
//! Wraps the storefront library in an interactive loop: browse the gift
//! set, build a cart, and check out against the remote order service. The
//! gating flow is the same one a graphical frontend would drive - phone
//! capture before the cart, address capture before checkout.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use std::io::{self, BufRead, Write};

use clap::Parser;

use tahadu_core::OrderId;
use tahadu_storefront::api::HttpApi;
use tahadu_storefront::checkout::{
    ActiveView, AddOutcome, Checkout, CheckoutOutcome, StepOutcome,
};
use tahadu_storefront::config::StorefrontConfig;
use tahadu_storefront::storage::FileStore;
use tahadu_storefront::{catalog, format};

/// Tahadu terminal storefront.
#[derive(Parser)]
#[command(name = "tahadu-storefront")]
#[command(author, version, about = "Terminal storefront for the Tahadu gift set")]
struct Cli {
    /// Base URL of the order service (overrides TAHADU_API_BASE_URL)
    #[arg(long)]
    api_base_url: Option<String>,

    /// Cache directory (overrides TAHADU_DATA_DIR)
    #[arg(long)]
    data_dir: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tahadu_storefront=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let mut config = StorefrontConfig::from_env().unwrap_or_else(|e| {
        tracing::error!("Configuration error: {e}");
        std::process::exit(1);
    });
    if let Some(url) = cli.api_base_url {
        config.api_base_url = url;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    let api = match HttpApi::new(&config.api_base_url) {
        Ok(api) => api,
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {e}");
            std::process::exit(1);
        }
    };
    let storage = match FileStore::open(&config.data_dir) {
        Ok(storage) => storage,
        Err(e) => {
            tracing::error!("Failed to open cache directory: {e}");
            std::process::exit(1);
        }
    };

    let mut checkout = Checkout::new(api, storage);

    println!("تهادوا تحابوا - مجموعة رمضان");
    println!("Type `help` for commands.");

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let Some(Ok(input)) = stdin.lock().lines().next() else {
            break;
        };
        let mut words = input.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let args: Vec<&str> = words.collect();

        match command {
            "help" => print_help(),
            "product" => show_product(),
            "add" => add(&mut checkout, &args).await,
            "cart" => show_cart(&checkout),
            "qty" => set_quantity(&mut checkout, &args),
            "rm" => remove(&mut checkout, &args),
            "checkout" => run_checkout(&mut checkout).await,
            "orders" => show_orders(&mut checkout).await,
            "order" => show_order(&checkout, &args).await,
            "login" => run_phone_capture(&mut checkout).await,
            "address" => run_address_capture(&mut checkout).await,
            "profile" => show_profile(&checkout),
            "logout" => {
                checkout.logout().await;
                println!("تم تسجيل الخروج");
            }
            "quit" | "exit" => break,
            other => println!("Unknown command `{other}`; try `help`."),
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  product            show the gift set and its variants");
    println!("  add <sku> [qty]    add a variant to the cart");
    println!("  cart               show the cart");
    println!("  qty <n> <q>        set the quantity of cart line n (1-based)");
    println!("  rm <n>             remove cart line n (1-based)");
    println!("  checkout           submit the cart as an order");
    println!("  orders             list your orders");
    println!("  order <id>         show one order");
    println!("  login              enter your phone number");
    println!("  address            enter your delivery address");
    println!("  profile            show the saved identity");
    println!("  logout             forget the saved identity");
    println!("  quit               leave");
}

fn show_product() {
    println!("مجموعة تهادوا تحابوا - {}", format::currency(catalog::UNIT_PRICE_EGP.into()));
    println!("الألوان:");
    for variant in catalog::VARIANTS {
        println!("  {:<24} {} ({})", variant.id, variant.name_ar, variant.hex);
    }
    println!("محتويات المجموعة:");
    for (title, description) in catalog::GIFT_SET_CONTENTS {
        println!("  - {title}: {description}");
    }
}

async fn add(checkout: &mut Checkout<HttpApi, FileStore>, args: &[&str]) {
    let Some(sku) = args.first() else {
        println!("usage: add <sku> [qty]");
        return;
    };
    let Some(variant) = catalog::find(sku) else {
        println!("No such variant `{sku}`; see `product`.");
        return;
    };
    let quantity = args
        .get(1)
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|q| *q >= 1)
        .unwrap_or(1);

    match checkout.add_to_cart(variant.to_cart_line(quantity)) {
        AddOutcome::Added => println!("تمت الإضافة إلى السلة"),
        AddOutcome::NeedsPhone => {
            println!("نحتاج رقم هاتفك أولا");
            run_phone_capture(checkout).await;
        }
    }
}

fn show_cart(checkout: &Checkout<HttpApi, FileStore>) {
    if checkout.cart().is_empty() {
        println!("السلة فارغة");
        return;
    }
    for (i, line) in checkout.cart().lines().iter().enumerate() {
        println!(
            "  {}. {} x{} - {}",
            i + 1,
            line.display_name,
            line.quantity,
            format::currency(line.line_total())
        );
    }
    println!("الإجمالي: {}", format::currency(checkout.cart().total()));
}

fn set_quantity(checkout: &mut Checkout<HttpApi, FileStore>, args: &[&str]) {
    let (Some(index), Some(quantity)) = (
        args.first().and_then(|raw| raw.parse::<usize>().ok()),
        args.get(1).and_then(|raw| raw.parse::<u32>().ok()),
    ) else {
        println!("usage: qty <n> <q>");
        return;
    };
    if index < 1 {
        return;
    }
    checkout.cart_mut().set_quantity(index - 1, quantity);
}

fn remove(checkout: &mut Checkout<HttpApi, FileStore>, args: &[&str]) {
    let Some(index) = args.first().and_then(|raw| raw.parse::<usize>().ok()) else {
        println!("usage: rm <n>");
        return;
    };
    if index < 1 {
        return;
    }
    checkout.cart_mut().remove_item(index - 1);
}

async fn run_checkout(checkout: &mut Checkout<HttpApi, FileStore>) {
    if checkout.cart().is_empty() {
        println!("السلة فارغة");
        return;
    }
    match checkout.checkout().await {
        Ok(CheckoutOutcome::Submitted(order)) => {
            println!("تم إنشاء الطلب بنجاح - طلب #{}", order.id);
        }
        Ok(CheckoutOutcome::NeedsPhone) => {
            println!("نحتاج رقم هاتفك أولا");
            run_phone_capture(checkout).await;
            println!("Run `checkout` again when you are ready.");
        }
        Ok(CheckoutOutcome::NeedsAddress) => {
            println!("نحتاج عنوان التوصيل أولا");
            run_address_capture(checkout).await;
            println!("Run `checkout` again when you are ready.");
        }
        Err(e) => println!("فشل إنشاء الطلب: {e}"),
    }
}

async fn show_orders(checkout: &mut Checkout<HttpApi, FileStore>) {
    if let Err(e) = checkout.orders_mut().fetch_orders().await {
        println!("تعذر تحميل الطلبات: {e}");
        return;
    }
    checkout.set_view(ActiveView::Orders);
    let orders = checkout.orders().orders();
    if orders.is_empty() {
        println!("لا توجد طلبات بعد");
        return;
    }
    for order in orders {
        println!(
            "  طلب #{} - {} - {} - {}",
            order.id,
            order.status.label_ar(),
            format::currency(order.total_price),
            format::date(order.created_at)
        );
    }
}

async fn show_order(checkout: &Checkout<HttpApi, FileStore>, args: &[&str]) {
    let Some(id) = args.first().and_then(|raw| raw.parse::<i64>().ok()) else {
        println!("usage: order <id>");
        return;
    };
    match checkout.orders().fetch_order(OrderId::new(id)).await {
        Ok(order) => {
            println!("طلب #{} - {}", order.id, order.status.label_ar());
            for item in &order.items {
                let name = catalog::find(item.color.as_str())
                    .map_or_else(|| item.color.as_str().to_owned(), |v| v.name_ar.to_owned());
                println!("  {} x{}", name, item.quantity);
            }
            println!("الإجمالي: {}", format::currency(order.total_price));
        }
        Err(e) => println!("تعذر تحميل الطلب: {e}"),
    }
}

async fn run_phone_capture(checkout: &mut Checkout<HttpApi, FileStore>) {
    let mut capture = checkout.phone_capture();
    println!("أدخل رقم هاتفك (01xxxxxxxxx):");
    let Some(input) = read_line() else { return };
    capture.set_input(input.trim());
    if !capture.is_valid() {
        println!("رقم الهاتف غير صالح");
        return;
    }
    match checkout.verify_phone(capture.input()).await {
        Ok(()) => println!("تم تسجيل رقم الهاتف بنجاح"),
        Err(e) => println!("فشل تسجيل رقم الهاتف: {e}"),
    }
}

async fn run_address_capture(checkout: &mut Checkout<HttpApi, FileStore>) {
    let mut wizard = tahadu_storefront::checkout::AddressWizard::new();
    loop {
        println!("{}", wizard.step().prompt_ar());
        let Some(input) = read_line() else { return };
        match wizard.answer(&input) {
            Ok(StepOutcome::Advanced(_)) => {}
            Ok(StepOutcome::Completed(address)) => {
                match checkout.submit_address(address).await {
                    Ok(()) => println!("تم تحديث العنوان بنجاح"),
                    Err(e) => println!("فشل تحديث العنوان: {e}"),
                }
                return;
            }
            Err(e) => println!("{e}"),
        }
    }
}

fn show_profile(checkout: &Checkout<HttpApi, FileStore>) {
    match checkout.session().current() {
        None => println!("لم يتم تسجيل الدخول"),
        Some(user) => {
            println!("رقم الهاتف: {}", user.phone_number);
            match (&user.city, &user.governorate) {
                (Some(city), Some(gov)) => println!("عنوان التوصيل: {city}، {gov}"),
                _ => println!("لم يتم إدخال العنوان"),
            }
            if let Some(street) = &user.street {
                println!("الشارع: {street}");
            }
        }
    }
}

fn read_line() -> Option<String> {
    print!("> ");
    let _ = io::stdout().flush();
    io::stdin().lock().lines().next()?.ok()
}
