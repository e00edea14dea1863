// src/main.rs
//
// Calculatrice — point d’entrée NATIF (CLI + GUI) + WEB (WASM)
// ------------------------------------------------------------
// But:
// - NATIF : ligne de commande (expression, invite, banc de cas) ou, sans argument,
//           eframe::run_native + NativeOptions
// - WEB (wasm32) : eframe::WebRunner + WebOptions + <canvas>, pas de CLI
//
// Côté WEB (WASM) : ton index.html doit contenir un canvas :
//   <canvas id="the_canvas_id"></canvas>

#![cfg_attr(target_arch = "wasm32", allow(unused_imports))]

use eframe::egui;

mod app;

use app::AppCalc;

/// Titre unique (natif + web).
const TITRE_APP: &str = "Calculatrice";

/* ------------------------ Entrée NATIF (PC) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::io::{self, BufRead, Write};
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;
    use tracing_subscriber::EnvFilter;

    use calculatrice_eval::noyau::{cas, eval_expression};

    /// Évalue une expression arithmétique (+ - * / ✕ ➗ ^ √ sin cos tan).
    /// Sans argument : ouvre l’interface graphique.
    #[derive(Parser, Debug)]
    #[command(name = "calculatrice", version)]
    pub struct Args {
        /// Expression à évaluer (ex: "3√(27)", "2(3+4)")
        pub expression: Option<String>,

        /// Demande l’expression sur l’entrée standard
        #[arg(short, long, conflicts_with_all = ["expression", "cas"])]
        pub invite: bool,

        /// Fichier de cas: une ligne "<expression>=<attendu>" par cas
        #[arg(long, value_name = "FICHIER", conflicts_with = "expression")]
        pub cas: Option<PathBuf>,

        /// Journalisation détaillée (debug)
        #[arg(short, long)]
        pub verbose: bool,
    }

    impl Args {
        pub fn mode_console(&self) -> bool {
            self.expression.is_some() || self.invite || self.cas.is_some()
        }
    }

    /// RUST_LOG prioritaire ; sinon warn (debug avec -v).
    pub fn init_logging(verbose: bool) {
        let defaut = if verbose { "debug" } else { "warn" };
        let filtre = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(defaut));

        tracing_subscriber::fmt()
            .with_env_filter(filtre)
            .with_writer(io::stderr)
            .init();
    }

    /// Retourne `false` si au moins un cas a échoué.
    pub fn executer(args: &Args) -> Result<bool> {
        if let Some(chemin) = &args.cas {
            let texte = std::fs::read_to_string(chemin)
                .with_context(|| format!("lecture de {}", chemin.display()))?;
            return Ok(banc_de_cas(&texte));
        }

        let expression = match &args.expression {
            Some(e) => e.clone(),
            None => lire_invite()?,
        };

        println!("{}", eval_expression(&expression));
        Ok(true)
    }

    fn lire_invite() -> Result<String> {
        println!("Enter your equation: ");
        io::stdout().flush().context("écriture stdout")?;

        let mut ligne = String::new();
        io::stdin()
            .lock()
            .read_line(&mut ligne)
            .context("lecture de l’entrée standard")?;
        Ok(ligne.trim_end_matches(['\r', '\n']).to_string())
    }

    fn banc_de_cas(texte: &str) -> bool {
        let rapport = cas::executer_cas(texte);

        for v in &rapport.verdicts {
            println!("Testing {}", v.ligne);
            if let Some(obtenu) = v.obtenu {
                println!("Got {obtenu}");
            }
            match &v.erreur {
                None => println!("Line passed"),
                Some(e) => {
                    println!("{e}");
                    println!("Line failed");
                }
            }
            println!();
        }

        if rapport.tout_reussi() {
            println!("All test cases passed");
        } else {
            println!("Some tests failed");
        }
        rapport.tout_reussi()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    let args = cli::Args::parse();
    cli::init_logging(args.verbose);

    if args.mode_console() {
        if !cli::executer(&args)? {
            std::process::exit(1);
        }
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([460.0, 640.0])
            .with_min_inner_size([380.0, 520.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITRE_APP,
        options,
        Box::new(|_cc| Ok(Box::<AppCalc>::default())),
    )
    .map_err(|e| anyhow::anyhow!("interface graphique: {e}"))
}

/* ------------------------ Entrée WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
fn main() {
    // En wasm32, le démarrage réel passe par `start()` (wasm_bindgen).
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{AppCalc, TITRE_APP};

    use wasm_bindgen::JsCast;
    use web_sys::{window, HtmlCanvasElement};

    /// ID du canvas attendu dans index.html.
    const CANVAS_ID: &str = "the_canvas_id";

    /// Point d’entrée automatique au chargement de la page.
    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
        let w = window().ok_or_else(|| js_err("window() indisponible"))?;
        let d = w
            .document()
            .ok_or_else(|| js_err("document() indisponible"))?;

        d.set_title(TITRE_APP);

        let canvas: HtmlCanvasElement = d
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| js_err("canvas introuvable (id incorrect dans index.html)"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_err("l’élément trouvé n’est pas un <canvas>"))?;

        eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|_cc| Ok(Box::<AppCalc>::default())),
            )
            .await
    }

    fn js_err(msg: &str) -> wasm_bindgen::JsValue {
        wasm_bindgen::JsValue::from_str(msg)
    }
}
