extern crate argparse;
extern crate html2plaintext;
use argparse::{ArgumentParser, Store, StoreFalse, StoreOption, StoreTrue};
use html2plaintext::config;
use std::io;
use std::io::Write;

fn translate<R>(input: R, conf: config::Config) -> html2plaintext::Result<String>
where
    R: io::Read,
{
    conf.string_from_read(input)
}

fn main() {
    env_logger::init();

    let mut infile: Option<String> = None;
    let mut outfile: Option<String> = None;
    let mut omit_links = false;
    let mut quote_width: usize = 74;
    let mut upper_headers = true;

    {
        let mut ap = ArgumentParser::new();
        ap.set_description("Render HTML as a plain-text digest.");
        ap.refer(&mut infile).add_argument(
            "infile",
            StoreOption,
            "Input HTML file (default is standard input)",
        );
        ap.refer(&mut outfile).add_option(
            &["-o", "--output"],
            StoreOption,
            "Output file (default is standard output)",
        );
        ap.refer(&mut omit_links).add_option(
            &["--omit-links"],
            StoreTrue,
            "Don't show link targets",
        );
        ap.refer(&mut quote_width).add_option(
            &["--quote-width"],
            Store,
            "Column to wrap quoted text at (default is 74)",
        );
        ap.refer(&mut upper_headers).add_option(
            &["--no-upper-headers"],
            StoreFalse,
            "Keep the case of table headers",
        );
        ap.parse_args_or_exit();
    }

    let conf = config::plain()
        .omit_links(omit_links)
        .quote_wrap_width(quote_width)
        .uppercase_table_headers(upper_headers);

    let result = match infile {
        None => {
            let stdin = io::stdin();
            translate(&mut stdin.lock(), conf)
        }
        Some(name) => {
            let mut file = std::fs::File::open(name).expect("Tried to open file");
            translate(&mut file, conf)
        }
    };
    let data = match result {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match outfile {
        None => {
            println!("{}", data);
        }
        Some(name) => {
            let mut file = std::fs::File::create(name).expect("Tried to create file");
            writeln!(file, "{}", data).unwrap();
        }
    };
}
