// src/app/vue.rs
//
// Vue (UI egui) : natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue (quand le champ est focus)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Boutons de fonctions générés depuis le registre du noyau
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)
// - Enter suffit (clavier PC + “Enter” virtuel mobile selon navigateur)

use eframe::egui;
use tracing::info;

use calculatrice_sci::noyau::registre;
use calculatrice_sci::ModeModulo;

use super::etat::AppCalc;

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice scientifique");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultat(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_options(ui);
                self.ui_historique(ui);
                self.ui_demarche(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Entrée :");

        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: 2*(3+4), sqrt(2)/2, sin(π/6), 2^3^2")
                .id_salt("entree_edit")
                .code_editor(),
        );

        // Si on a cliqué un bouton (pavé / fonctions / DEL / C / etc.), on redonne le focus
        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // --- Clavier : Enter évalue (seulement si le champ est focus) ---
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if (resp.has_focus() || resp.lost_focus()) && enter {
            self.eval_via_noyau();
        }

        ui.add_space(6.0);

        ui.horizontal(|ui| {
            // Contrat: C = entrée seulement ; CLR = résultats seulement ; AC = tout
            self.bouton_action(ui, "C", "Efface seulement l’entrée", Action::ClearEntree);
            self.bouton_action(
                ui,
                "CLR",
                "Efface résultat + erreur + démarche",
                Action::ClearResultats,
            );
            self.bouton_action(
                ui,
                "AC",
                "Remise à zéro totale (historique et options compris)",
                Action::ResetTotal,
            );
            self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace);

            ui.add_space(10.0);

            let eq = ui.add_sized([64.0, 30.0], egui::Button::new("="));
            if eq.clicked() {
                self.eval_via_noyau();
            }
        });

        ui.add_space(8.0);

        // Pavé numérique + opérateurs
        self.ui_pave(ui);

        ui.add_space(8.0);

        // Fonctions du registre (sin(, sqrt(, ...)
        ui.horizontal_wrapped(|ui| {
            for nom in registre::noms_fonctions() {
                self.bouton_insert(ui, nom, &format!("{nom}("), InsertKind::Func);
            }
        });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_insert(ui, "7", "7", InsertKind::Digit);
                self.bouton_insert(ui, "8", "8", InsertKind::Digit);
                self.bouton_insert(ui, "9", "9", InsertKind::Digit);
                self.bouton_insert(ui, "÷", "÷", InsertKind::Op);
                self.bouton_insert(ui, "(", "(", InsertKind::OpenParen);
                ui.end_row();

                self.bouton_insert(ui, "4", "4", InsertKind::Digit);
                self.bouton_insert(ui, "5", "5", InsertKind::Digit);
                self.bouton_insert(ui, "6", "6", InsertKind::Digit);
                self.bouton_insert(ui, "×", "×", InsertKind::Op);
                self.bouton_insert(ui, ")", ")", InsertKind::CloseParen);
                ui.end_row();

                self.bouton_insert(ui, "1", "1", InsertKind::Digit);
                self.bouton_insert(ui, "2", "2", InsertKind::Digit);
                self.bouton_insert(ui, "3", "3", InsertKind::Digit);
                self.bouton_insert(ui, "-", "-", InsertKind::Op);
                self.bouton_insert(ui, "^", "^", InsertKind::Op);
                ui.end_row();

                self.bouton_insert(ui, "0", "0", InsertKind::Digit);
                self.bouton_insert(ui, ".", ".", InsertKind::Digit);
                self.bouton_insert(ui, "%", "%", InsertKind::Percent);
                self.bouton_insert(ui, "+", "+", InsertKind::Op);
                self.bouton_insert(ui, ",", ", ", InsertKind::CloseParen);
                ui.end_row();

                self.bouton_insert(ui, "π", "π", InsertKind::Word);
                self.bouton_insert(ui, "e", "e", InsertKind::Word);
                self.bouton_insert(ui, "√", "√(", InsertKind::Func);
                self.bouton_action(ui, "±", "Change le signe de l’entrée", Action::ChangerSigne);
                ui.end_row();
            });
    }

    /// Backspace “intelligent” : retire d’un coup un nom de fonction avec sa '('
    /// ("asin(", "sqrt(", ...) ou une constante ("pi"), sinon un caractère.
    fn backspace_entree(&mut self) {
        // Retire espaces finaux
        let n = self.entree.trim_end().len();
        self.entree.truncate(n);
        if self.entree.is_empty() {
            return;
        }

        // les plus longs d’abord : "asin(" avant "sin("
        let mut motifs: Vec<String> = registre::noms_fonctions()
            .into_iter()
            .map(|nom| format!("{nom}("))
            .collect();
        motifs.push("pi".to_string());
        motifs.sort_by_key(|m| std::cmp::Reverse(m.len()));

        let retire = motifs
            .iter()
            .find(|m| self.entree.ends_with(m.as_str()))
            .map(|m| m.len());

        match retire {
            Some(n) => self.entree.truncate(self.entree.len() - n),
            None => {
                self.entree.pop();
            }
        }

        let n = self.entree.trim_end().len();
        self.entree.truncate(n);
    }

    fn ui_resultat(&mut self, ui: &mut egui::Ui) {
        ui.label("Résultat :");
        Self::champ_monospace(ui, "resultat_out", &self.resultat, 1);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            let titre = self.genre_erreur.map(|g| g.libelle()).unwrap_or("Erreur");
            ui.colored_label(
                ui.visuals().error_fg_color,
                format!("{titre} : {}", self.erreur),
            );
        }
    }

    fn ui_options(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Options")
            .default_open(false)
            .show(ui, |ui| {
                ui.checkbox(
                    &mut self.options.multiplication_implicite,
                    "Multiplication implicite (2π, 2(3+4))",
                );
                ui.horizontal(|ui| {
                    ui.label("% :");
                    ui.radio_value(&mut self.options.modulo, ModeModulo::Reste, "reste (7 % 3)");
                    ui.radio_value(&mut self.options.modulo, ModeModulo::Pourcent, "pourcent (50%)");
                });
            });
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        let mut rappel = None;

        egui::CollapsingHeader::new(format!("Historique ({})", self.historique.len()))
            .default_open(true)
            .show(ui, |ui| {
                if self.historique.is_empty() {
                    ui.monospace("vide");
                    return;
                }
                egui::ScrollArea::vertical()
                    .id_salt("historique_scroll")
                    .max_height(160.0)
                    .show(ui, |ui| {
                        for (i, ligne) in self.historique.iter().enumerate() {
                            let texte = format!("{} = {}", ligne.expression, ligne.resultat);
                            let resp = ui
                                .add(egui::Button::new(egui::RichText::new(texte).monospace()))
                                .on_hover_text("Rappeler l’expression");
                            if resp.clicked() {
                                rappel = Some(i);
                            }
                        }
                    });
            });

        if let Some(i) = rappel {
            self.rappeler(i);
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(true)
            .show(ui, |ui| {
                let d = &self.demarche;
                Self::champ_demarche(ui, "Entrée", "demarche_entree", &d.entree);
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &d.jetons);
                Self::champ_demarche(ui, "Arbre", "demarche_arbre", &d.arbre);
                Self::champ_demarche(ui, "Valeur", "demarche_valeur", &d.valeur);
                Self::champ_demarche(ui, "Note", "demarche_note", &d.note);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 1);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearResultats => self.clear_resultats(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => self.backspace_entree(),
                Action::ChangerSigne => self.changer_signe(),
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str, kind: InsertKind) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if resp.clicked() {
            inserer(&mut self.entree, to_insert, kind);
            self.focus_entree = true;
        }
    }

    /// Évalue l’expression via le noyau, puis dépose résultat/démarche dans l’état UI.
    fn eval_via_noyau(&mut self) {
        match calculatrice_sci::eval_expression(&self.entree, &self.options) {
            Ok((resultat, demarche)) => {
                info!(entree = %demarche.entree, resultat = %resultat, "évaluation");
                self.set_resultat(resultat.to_string(), demarche);
            }
            Err(e) => {
                info!(genre = ?e.kind(), erreur = %e, "évaluation refusée");
                self.set_erreur(&e);
            }
        }
    }
}

/// Insère un symbole du pavé avec l’espacement d’une saisie soignée.
/// Les espaces sont cosmétiques : le noyau les ignore.
fn inserer(entree: &mut String, to_insert: &str, kind: InsertKind) {
    let dernier = entree.chars().rev().find(|c| !c.is_whitespace());

    match kind {
        InsertKind::CloseParen | InsertKind::Percent => {
            let n = entree.trim_end().len();
            entree.truncate(n);
        }
        // collés : "2π", "2(" restent lisibles par la multiplication implicite
        InsertKind::OpenParen | InsertKind::Func | InsertKind::Word | InsertKind::Digit => {}
        InsertKind::Op => {
            let n = entree.trim_end().len();
            entree.truncate(n);
            // signe en tête ou après '(' : pas d’espace
            if matches!(dernier, Some(c) if c != '(') {
                entree.push(' ');
                entree.push_str(to_insert);
                entree.push(' ');
                return;
            }
        }
    }

    entree.push_str(to_insert);
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
    Backspace,
    ChangerSigne,
}

#[derive(Clone, Copy, Debug)]
enum InsertKind {
    Digit,
    Word,
    Func,
    Op,
    Percent,
    OpenParen,
    CloseParen,
}
