use num_format::{Locale, ToFormattedString};

use crate::db::types::UserRecord;

/// Renders the self-contained share page embedding a user's stats card.
/// Pure templating: the username is escaped for text/attribute contexts,
/// the image URL for attribute and query-string contexts.
pub fn render_share_page(username: &str, image_url: &str, stats: Option<&UserRecord>) -> String {
    let safe_name = escape_html(username);
    let safe_image = escape_html(image_url);

    let tweet_url = format!(
        "https://twitter.com/intent/tweet?text={}&url={}",
        urlencoding::encode(&format!("{username}'s GitHub Stats")),
        urlencoding::encode(image_url),
    );
    let safe_tweet_url = escape_html(&tweet_url);

    let stats_block = stats
        .map(|user| {
            format!(
                "<p>Contributions: {}</p>\n      <p>Streak: {} days</p>",
                user.contributions.to_formatted_string(&Locale::en),
                user.streak.to_formatted_string(&Locale::en),
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="twitter:card" content="summary_large_image">
  <meta name="twitter:title" content="{safe_name}'s GitHub Stats">
  <meta name="twitter:image" content="{safe_image}">
  <meta property="og:title" content="{safe_name}'s GitHub Stats">
  <meta property="og:image" content="{safe_image}">
  <title>{safe_name}'s GitHub Stats</title>
  <style>
    body {{
      font-family: Arial, sans-serif;
      margin: 0;
      padding: 0;
      display: flex;
      justify-content: center;
      align-items: center;
      min-height: 100vh;
      background-color: #f0f0f0;
    }}
    .container {{
      max-width: 600px;
      width: 100%;
      padding: 20px;
      box-sizing: border-box;
    }}
    img {{
      max-width: 100%;
      height: auto;
    }}
  </style>
</head>
<body>
  <div class="container">
    <h1>{safe_name}'s GitHub Stats</h1>
    <img src="{safe_image}" alt="{safe_name}'s GitHub Stats" />
    {stats_block}
    <p><a href="{safe_tweet_url}">Share on Twitter</a></p>
  </div>
</body>
</html>
"#
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
