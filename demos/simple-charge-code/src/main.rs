use std::fs;
use std::path::Path;

use clap::Parser;
use serde::Deserialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use pixcode::{
    Amount, Charge, Description, DynamicCharge, Merchant, MerchantCity, MerchantName, PixKey,
    PostalCode, StaticCharge, TxId,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Merchant profile in TOML format.
    #[arg(short, long)]
    profile: String,
    /// Fixed amount in reais, e.g. "10.00". Makes the code single-use.
    #[arg(short, long)]
    amount: Option<String>,
    /// Transaction id for reconciliation. Generated for single-use codes
    /// when omitted.
    #[arg(short, long)]
    txid: Option<String>,
    /// Free-text description shown to the payer.
    #[arg(short, long)]
    description: Option<String>,
    #[arg(short, long)]
    logfile: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Profile {
    key: String,
    name: String,
    city: String,
    postal_code: Option<String>,
}

impl Profile {
    fn load_from_path(path: impl AsRef<Path>) -> Self {
        let contents = fs::read_to_string(path).expect("profile file to be readable");
        toml::from_str(&contents).expect("profile file to be valid TOML")
    }
}

fn main() {
    let args = Args::parse();

    if let Some(path) = &args.logfile {
        let p = Path::new(path);
        std::fs::create_dir_all(p.parent().unwrap()).unwrap();
        let logfile = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .open(p)
            .expect("log file to open successfully");
        let subscriber = tracing_subscriber::fmt::Subscriber::builder()
            .with_writer(logfile)
            .with_env_filter(EnvFilter::from_default_env())
            .finish();
        tracing::subscriber::set_global_default(subscriber).unwrap();
    } else {
        tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    }

    let profile = Profile::load_from_path(&args.profile);
    let merchant = build_merchant(&profile);
    let key: PixKey = profile.key.parse().expect("profile key to be a valid key");

    let charge = build_charge(&args, key, merchant);
    let payload = charge.to_payload();

    let decoded = payload.decode().expect("assembled payload to decode back");
    debug!(?decoded, "self-check decode");

    println!("{payload}");
}

fn build_merchant(profile: &Profile) -> Merchant {
    let name = MerchantName::new(profile.name.clone()).expect("profile name to be valid");
    let city = MerchantCity::new(profile.city.clone()).expect("profile city to be valid");
    let mut merchant = Merchant::new(name, city);
    if let Some(postal_code) = &profile.postal_code {
        let postal_code =
            PostalCode::new(postal_code.clone()).expect("profile postal code to be valid");
        merchant = merchant.with_postal_code(postal_code);
    }
    merchant
}

fn build_charge(args: &Args, key: PixKey, merchant: Merchant) -> Charge {
    let description = args
        .description
        .clone()
        .map(|d| Description::new(d).expect("description to be printable ASCII"));

    match &args.amount {
        Some(raw) => {
            let amount: Amount = raw.parse().expect("amount to be a positive decimal");
            let txid = args.txid.clone().unwrap_or_else(generated_txid);
            let mut charge = DynamicCharge::new(key, merchant, amount)
                .with_txid(TxId::new(txid).expect("transaction id to be valid"));
            if let Some(description) = description {
                charge = charge
                    .with_description(description)
                    .expect("description to fit next to the key");
            }
            Charge::Dynamic(charge)
        }
        None => {
            let mut charge = StaticCharge::new(key, merchant);
            if let Some(txid) = &args.txid {
                charge = charge.with_txid(TxId::new(txid.clone()).expect("transaction id to be valid"));
            }
            if let Some(description) = description {
                charge = charge
                    .with_description(description)
                    .expect("description to fit next to the key");
            }
            Charge::Static(charge)
        }
    }
}

fn generated_txid() -> String {
    // hyphen-free so it stays alphanumeric
    let mut txid = uuid::Uuid::new_v4().simple().to_string();
    txid.truncate(25);
    txid
}
