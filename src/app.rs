// src/app.rs
//
// Calculatrice — module App (racine)
// ----------------------------------
// - Déclare les sous-modules (etat.rs + vue.rs)
// - Ré-exporte AppCalc (pour main.rs)
// - Fournit l’impl eframe::App (NATIF + WEB)
//
// Clavier : une seule source, les événements egui de la frame.
//   Text("7") / Text("%") / ...        -> Commande::depuis_touche(caractère)
//   Key Enter / Backspace / Escape     -> Commande::depuis_touche(nom)
// Les autres touches (Num1, Plus...) sont ignorées : leur texte arrive déjà via Text.

pub mod etat;
pub mod vue;

pub use etat::AppCalc;

use std::time::Duration;

use calculatrice_hors_ligne::moteur::Commande;
use eframe::egui;

fn commandes_clavier(evenements: &[egui::Event]) -> Vec<Commande> {
    let mut out = Vec::new();
    for ev in evenements {
        match ev {
            egui::Event::Text(t) => {
                let mut tampon = [0u8; 4];
                out.extend(
                    t.chars()
                        .filter_map(|c| Commande::depuis_touche(c.encode_utf8(&mut tampon))),
                );
            }
            egui::Event::Key {
                key: key @ (egui::Key::Enter | egui::Key::Backspace | egui::Key::Escape),
                pressed: true,
                ..
            } => out.extend(Commande::depuis_touche(key.name())),
            _ => {}
        }
    }
    out
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (commandes, maintenant) =
            ctx.input(|i| (commandes_clavier(&i.events), i.time));

        for cmd in commandes {
            self.executer(cmd, maintenant);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui, maintenant);
        });

        self.fenetre_historique(ctx, maintenant);

        // l’avis doit disparaître même sans interaction
        if let Some(s) = self.avis_restant(maintenant) {
            ctx.request_repaint_after(Duration::from_secs_f64(s));
        }
    }
}
