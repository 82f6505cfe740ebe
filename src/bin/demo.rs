use curlreq::parse_curl;
use curlreq::curl::join_continuations;

fn main() {
    let curl_command = r#"curl --location --request POST 'https://example.com/api/lottery/run?debug' \
--header 'Authorization-Token;' \
--header 'Content-Type: application/json' \
--data-raw '{
    "activity_id": 0,
    "lottery_count": 0
}'"#;

    match parse_curl(&join_continuations(curl_command)) {
        Ok(req) => println!("{:#?}", req),
        Err(e) => eprintln!("Error parsing curl command: {}", e),
    }
}
