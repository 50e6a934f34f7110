use maud::{html, Markup, DOCTYPE};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #222; }
header { display: flex; align-items: center; gap: 2rem; padding: .75rem 1.5rem; box-shadow: 0 1px 4px #0002; }
header nav ul { display: flex; gap: 1rem; list-style: none; margin: 0; padding: 0; }
main { max-width: 1100px; margin: 1.5rem auto; padding: 0 1rem; }
.card { border: 1px solid #ddd; border-radius: 8px; padding: 1rem; margin-bottom: 1rem; }
.listing { display: grid; grid-template-columns: 1fr 300px; gap: 1rem; }
.listing img { width: 300px; border-radius: 6px; }
.alert { padding: .75rem 1rem; border-radius: 6px; margin-bottom: 1rem; }
.alert-warning { background: #fff6db; }
.alert-error { background: #fde8e8; color: #8a1c1c; }
button.primary { background: #ff4b4b; color: white; border: none; border-radius: 6px; padding: .5rem 1rem; cursor: pointer; }
button:disabled { opacity: .5; cursor: default; }
table.editor { border-collapse: collapse; font-size: .9rem; }
table.editor th, table.editor td { border: 1px solid #ddd; padding: .25rem; }
table.editor input[type=text] { width: 8rem; }
"#;

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="fr" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (maud::PreEscaped(STYLE)) }
            }
            body {
                header {
                    h3 { "Sales Dashboard" }
                    nav {
                        ul {
                            li { a href="/" { "Recherche vêtements" } }
                            li { a href="/requests" { "Edition requêtes" } }
                        }
                    }
                }
                main { (content) }
            }
        }
    }
}
