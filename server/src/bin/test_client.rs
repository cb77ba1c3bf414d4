use shared::{MAX_GUESSES, NUM_ROUNDS};
use tokio::net::TcpStream;

// Guess order by rough English letter frequency
const GUESS_ORDER: &[u8] = b"etaoinshrdlucmfwypvbgkjqxz";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| format!("127.0.0.1:{}", shared::DEFAULT_PORT));
    let nickname = std::env::args().nth(2).unwrap_or_else(|| "tester".to_string());

    println!("Connecting to {}", addr);
    let mut stream = TcpStream::connect(&addr).await?;

    println!("Joining as {:?}", nickname);
    shared::write_text_frame(&mut stream, &nickname).await?;

    for round in 1..=NUM_ROUNDS {
        let word_len = shared::read_word_len(&mut stream).await? as usize;
        println!("Round {}: the word has {} letters", round, word_len);

        let mut prev = vec![false; word_len];
        let mut wrong = 0u8;

        for guess in GUESS_ORDER {
            shared::write_guess(&mut stream, *guess).await?;
            let progress = shared::read_progress(&mut stream, word_len).await?;

            let line: String = progress.iter().map(|p| if *p { '1' } else { '0' }).collect();
            println!("  guessed '{}': {}", *guess as char, line);

            if progress == prev {
                wrong += 1;
            }
            prev = progress;

            if prev.iter().all(|p| *p) {
                println!("  solved it with {} wrong guesses", wrong);
                break;
            }
            if wrong >= MAX_GUESSES {
                println!("  out of guesses");
                break;
            }
        }

        let report = shared::read_text_frame(&mut stream).await?;
        println!("{}", report);

        if round < NUM_ROUNDS {
            shared::write_ready(&mut stream).await?;
        }
    }

    let final_report = shared::read_text_frame(&mut stream).await?;
    println!("Final result:\n{}", final_report);
    println!("Test client finished");

    Ok(())
}
