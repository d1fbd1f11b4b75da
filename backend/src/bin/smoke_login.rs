use estante::{bootstrap, init_tracing, library_fetch, session_login};

#[tokio::main]
async fn main() {
  init_tracing();

  // exporta ESTANTE_EMAIL / ESTANTE_PASSWORD y ajusta [client].api_url
  let email = std::env::var("ESTANTE_EMAIL").expect("set ESTANTE_EMAIL");
  let password = std::env::var("ESTANTE_PASSWORD").expect("set ESTANTE_PASSWORD");

  let state = bootstrap().await.expect("failed to wire the app");

  let session = session_login(&state, &email, &password).await.expect("login failed");
  let username = session.user.map(|user| user.username).unwrap_or_default();
  println!("logged in as {username}");

  let library = library_fetch(&state).await.expect("failed to fetch books");
  println!("{} books in the collection", library.books.len());

  for book in &library.books {
    println!("- {} — {} [{}] {}", book.title, book.author, book.status, book.rating);
  }
}
