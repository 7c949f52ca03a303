// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// - Écran : tampon (grand, monospace) + aperçu live
// - Pavé : C DEL % ÷ / 7 8 9 × / 4 5 6 − / 1 2 3 + / 0 . ( ) / =
// - Fenêtre “Historique” : plus récent en haut, heure locale, bouton vider
// - Avis (toast) en bas, masqué à échéance
//
// Les glyphes ÷ × − ne sont que des étiquettes : le tampon reçoit / * -.

use chrono::{DateTime, Local};
use eframe::egui;

use super::etat::AppCalc;
use calculatrice_hors_ligne::moteur::Commande;

/// Étiquette affichée -> commande.
const PAVE: [[(&str, Commande); 4]; 5] = [
    [
        ("C", Commande::Effacer),
        ("DEL", Commande::RetourArriere),
        ("%", Commande::Pourcent),
        ("÷", Commande::Ajouter('/')),
    ],
    [
        ("7", Commande::Ajouter('7')),
        ("8", Commande::Ajouter('8')),
        ("9", Commande::Ajouter('9')),
        ("×", Commande::Ajouter('*')),
    ],
    [
        ("4", Commande::Ajouter('4')),
        ("5", Commande::Ajouter('5')),
        ("6", Commande::Ajouter('6')),
        ("−", Commande::Ajouter('-')),
    ],
    [
        ("1", Commande::Ajouter('1')),
        ("2", Commande::Ajouter('2')),
        ("3", Commande::Ajouter('3')),
        ("+", Commande::Ajouter('+')),
    ],
    [
        ("0", Commande::Ajouter('0')),
        (".", Commande::Ajouter('.')),
        ("(", Commande::Ajouter('(')),
        (")", Commande::Ajouter(')')),
    ],
];

const TAILLE_TOUCHE: [f32; 2] = [64.0, 44.0];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui, maintenant: f64) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        ui.horizontal(|ui| {
            ui.heading(calculatrice_hors_ligne::config::TITRE_APP);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let libelle = format!("Historique ({})", self.moteur.historique().len());
                if ui.selectable_label(self.historique_ouvert, libelle).clicked() {
                    self.basculer_historique();
                }
            });
        });
        ui.add_space(6.0);

        self.ui_ecran(ui);

        ui.add_space(8.0);
        self.ui_pave(ui, maintenant);

        if let Some(msg) = self.avis_visible(maintenant) {
            ui.add_space(8.0);
            ui.colored_label(ui.visuals().warn_fg_color, msg);
        }
    }

    fn ui_ecran(&self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                    ui.label(
                        egui::RichText::new(self.moteur.tampon())
                            .monospace()
                            .size(28.0),
                    );
                    ui.label(
                        egui::RichText::new(self.moteur.apercu_affiche())
                            .monospace()
                            .weak(),
                    );
                });
            });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui, maintenant: f64) {
        egui::Grid::new("pave_calculatrice")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for rangee in PAVE {
                    for (etiquette, cmd) in rangee {
                        self.touche(ui, etiquette, cmd, maintenant);
                    }
                    ui.end_row();
                }
            });

        ui.add_space(6.0);
        let largeur = 4.0 * TAILLE_TOUCHE[0] + 3.0 * 6.0;
        let resp = ui.add_sized([largeur, TAILLE_TOUCHE[1]], egui::Button::new("="));
        if resp.clicked() {
            self.executer(Commande::Evaluer, maintenant);
            resp.surrender_focus();
        }
    }

    fn touche(&mut self, ui: &mut egui::Ui, etiquette: &str, cmd: Commande, maintenant: f64) {
        let resp = ui.add_sized(TAILLE_TOUCHE, egui::Button::new(etiquette));
        if resp.clicked() {
            self.executer(cmd, maintenant);
            // sinon Enter “cliquerait” de nouveau la touche focalisée
            resp.surrender_focus();
        }
    }

    /// Fenêtre flottante, indépendante du panneau central.
    pub fn fenetre_historique(&mut self, ctx: &egui::Context, maintenant: f64) {
        let mut ouvert = self.historique_ouvert;
        let mut vider = false;

        egui::Window::new("Historique")
            .open(&mut ouvert)
            .default_width(320.0)
            .show(ctx, |ui| {
                let entrees = self.moteur.historique().entrees();
                if entrees.is_empty() {
                    ui.weak("Aucun calcul");
                } else {
                    egui::ScrollArea::vertical().max_height(360.0).show(ui, |ui| {
                        for e in entrees.iter().rev() {
                            ui.monospace(format!("{} = {}", e.expr, e.result));
                            ui.small(heure_locale(&e.at));
                            ui.separator();
                        }
                    });
                }

                ui.add_space(4.0);
                if ui.button("Vider l’historique").clicked() {
                    vider = true;
                }
            });

        self.historique_ouvert = ouvert;
        if vider {
            self.effacer_historique(maintenant);
        }
    }
}

/// Horodatage ISO (UTC) -> date/heure locale ; texte brut si illisible.
fn heure_locale(at: &str) -> String {
    match DateTime::parse_from_rfc3339(at) {
        Ok(t) => t
            .with_timezone(&Local)
            .format("%d/%m/%Y %H:%M:%S")
            .to_string(),
        Err(_) => at.to_string(),
    }
}
