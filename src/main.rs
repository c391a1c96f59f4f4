use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use car_portal::form::SubmissionForm;
use car_portal::http_client::HttpClient;
use car_portal::notify::{Toast, ToastSink, ToastVariant};
use car_portal::users::{self, Credentials};
use car_portal::validation::Field;

struct StdoutSink;

impl ToastSink for StdoutSink {
    fn toast(&self, toast: Toast) {
        match toast.variant {
            ToastVariant::Default => println!("[ok] {}: {}", toast.title, toast.description),
            ToastVariant::Destructive => println!("[!!] {}: {}", toast.title, toast.description),
        }
    }
}

const HELP: &str = "commands:
  login <email> <password>     authenticate against the portal
  signup <email> <password>    create an account
  model <text>                 set the car model
  price <text>                 set the price
  phone <text>                 set the phone number
  city <Lahore|Karachi>        set the city
  max <1-10>                   set the image limit
  attach <path> [path...]      encode and attach image files
  remove <index>               drop an attached image
  show                         print the current form
  submit                       submit the listing
  table                        print accepted submissions
  reset                        clear the submission table
  quit";

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let client = HttpClient::from_env()?;
    println!("car portal client, backend at {}", client.base_url());
    println!("{}", HELP);

    let mut form = SubmissionForm::new(client.clone(), StdoutSink);
    let stdin = io::stdin();

    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        let (command, rest) = match line.split_once(' ') {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "login" | "signup" => {
                let Some((email, password)) = rest.split_once(' ') else {
                    println!("usage: {} <email> <password>", command);
                    continue;
                };
                let creds = Credentials { email: email.to_string(), password: password.to_string() };
                let result = if command == "login" {
                    users::login(&client, &creds).await
                } else {
                    users::signup(&client, &creds).await
                };
                match result {
                    Ok(()) => println!("{} successful, over to the submission form", command),
                    Err(err) => println!("[!!] {}", err),
                }
            }
            "model" => set_and_report(&mut form, Field::CarModel, rest),
            "price" => set_and_report(&mut form, Field::Price, rest),
            "phone" => set_and_report(&mut form, Field::PhoneNumber, rest),
            "city" => set_and_report(&mut form, Field::City, rest),
            "max" => match rest.parse::<u8>() {
                Ok(limit) => {
                    form.set_max_images(limit);
                    println!("image limit {}, {} attached", form.values().max_images, form.images().len());
                }
                Err(_) => println!("usage: max <1-10>"),
            },
            "attach" => {
                let paths: Vec<PathBuf> = rest.split_whitespace().map(PathBuf::from).collect();
                if paths.is_empty() {
                    println!("usage: attach <path> [path...]");
                    continue;
                }
                form.attach_images(&paths).await;
                println!("{} of {} image slots used", form.images().len(), form.values().max_images);
            }
            "remove" => match rest.parse::<usize>() {
                Ok(index) => form.remove_image(index),
                Err(_) => println!("usage: remove <index>"),
            },
            "show" => {
                let values = form.values();
                println!(
                    "model='{}' price='{}' phone='{}' city={} images {}/{}",
                    values.car_model,
                    values.price,
                    values.phone_number,
                    values.city.as_str(),
                    form.images().len(),
                    values.max_images
                );
            }
            "submit" => form.submit().await,
            "table" => {
                for record in form.table() {
                    println!(
                        "{} | {} | {} | {} | {} image(s) | {}",
                        record.id,
                        record.values.car_model,
                        record.values.price,
                        record.values.city.as_str(),
                        record.images.len(),
                        record.submitted_at.format("%Y-%m-%d %H:%M:%S")
                    );
                }
                println!("{} submission(s)", form.table().len());
            }
            "reset" => {
                form.reset_table();
                println!("table cleared");
            }
            "quit" | "exit" => break,
            _ => println!("{}", HELP),
        }
    }

    Ok(())
}

fn set_and_report<B, N>(form: &mut SubmissionForm<B, N>, field: Field, raw: &str)
where
    B: car_portal::http_client::SubmissionBackend,
    N: ToastSink,
{
    form.set_field(field, raw);
    match form.field_error(field) {
        Some(err) => println!("[!!] {}", err),
        None => println!("{} ok", field.as_str()),
    }
}
