// ============================================================================
// MODELS - MODULE PRINCIPAL
// ============================================================================
//
// Description:
//   Point d'entrée pour tous les modèles de données.
//   Chaque modèle correspond à une table avec SeaORM.
//
// Liste des modules:
//   - health : Health check API
//   - users : Comptes utilisateurs (login, staff)
//   - user_profile : Profil détaillé d'un user (1-1)
//   - portfolio : Portfolios d'investissement d'un user
//   - stock / etf / cryptocurrency : Holdings d'un portfolio
//   - virtual_trade : Trades virtuels (BUY/SELL) sur un holding
//   - blog_post : Articles du blog (gérés par les admins)
//   - faq : Questions fréquentes (lecture publique)
//   - dto : Data Transfer Objects pour les requêtes API
//
// Points d'attention:
//   - Les clés étrangères sont exposées en JSON sous le nom de la relation
//     (user, portfolio, author) et contiennent l'id référencé
//   - Les montants sont en NUMERIC(10, 2), sérialisés en string ("5.00")
//
// ============================================================================

pub mod health;
pub mod dto;
pub mod users;
pub mod user_profile;
pub mod portfolio;
pub mod stock;
pub mod etf;
pub mod cryptocurrency;
pub mod virtual_trade;
pub mod blog_post;
pub mod faq;
