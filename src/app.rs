// src/app.rs
//
// Calculatrice scientifique : module App (racine)
// -----------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB) + persistance
//
// Important:
// - La gestion Enter est faite dans vue.rs (quand le champ a le focus).
// - Persistance via eframe::Storage (clé eframe::APP_KEY) : entrée, historique, options.

pub mod etat;
pub mod vue;

// Ré-export pratique : `use app::AppCalc;`
pub use etat::AppCalc;

use eframe::egui;
use tracing::debug;

impl AppCalc {
    /// Restaure l’état sauvegardé s’il existe, sinon état neuf.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let restaure = cc
            .storage
            .and_then(|s| eframe::get_value::<AppCalc>(s, eframe::APP_KEY));

        match restaure {
            Some(mut app) => {
                debug!(historique = app.historique.len(), "état restauré");
                app.focus_entree = true;
                app
            }
            None => Self::default(),
        }
    }
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Raccourci clavier global minimal (safe natif + web) :
        // ESC = effacer seulement l’entrée (comme bouton "C").
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.clear_entree();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // dans vue.rs
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }
}
