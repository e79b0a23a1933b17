// ABOUTME: The seven subcontract disciplines and their fixed per-discipline configuration
// ABOUTME: Matrix item catalogs, mandatory safety documents and supplier placeholders

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Catalog category shared by every discipline for safety/compliance items
pub const SAFETY_CATEGORY: &str = "sms";

#[derive(Debug, Error, PartialEq)]
#[error("Unknown discipline: {0}")]
pub struct ParseDisciplineError(pub String);

/// Subcontract discipline of a scope package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Discipline {
    Dutos,
    Hidraulica,
    Eletrica,
    Automacao,
    Tab,
    Movimentacoes,
    LinhaDeCobre,
}

impl Discipline {
    pub const ALL: [Discipline; 7] = [
        Discipline::Dutos,
        Discipline::Hidraulica,
        Discipline::Eletrica,
        Discipline::Automacao,
        Discipline::Tab,
        Discipline::Movimentacoes,
        Discipline::LinhaDeCobre,
    ];

    /// Display name, as printed in documents and stored in the table
    pub fn name(self) -> &'static str {
        match self {
            Discipline::Dutos => "Dutos",
            Discipline::Hidraulica => "Hidráulica",
            Discipline::Eletrica => "Elétrica",
            Discipline::Automacao => "Automação",
            Discipline::Tab => "TAB",
            Discipline::Movimentacoes => "Movimentações",
            Discipline::LinhaDeCobre => "Linha de Cobre",
        }
    }

    /// Route and catalog-category slug
    pub fn slug(self) -> &'static str {
        match self {
            Discipline::Dutos => "dutos",
            Discipline::Hidraulica => "hidraulica",
            Discipline::Eletrica => "eletrica",
            Discipline::Automacao => "automacao",
            Discipline::Tab => "tab",
            Discipline::Movimentacoes => "movimentacoes",
            Discipline::LinhaDeCobre => "cobre",
        }
    }

    pub fn config(self) -> DisciplineConfig {
        DisciplineConfig::for_discipline(self)
    }

    fn matrix_items(self) -> &'static [&'static str] {
        match self {
            Discipline::Dutos => &[
                "Dutos em chapa galvanizada",
                "Isolamento térmico",
                "Suportes e fixações",
                "Grelhas e difusores",
                "Dampers corta-fogo",
                "Içamento vertical de materiais",
                "Andaimes e plataformas",
                "Consumíveis de montagem",
            ],
            Discipline::Hidraulica => &[
                "Tubos e conexões",
                "Válvulas e registros",
                "Suportes e fixações",
                "Isolamento térmico",
                "Bombas",
                "Teste hidrostático",
                "Andaimes e plataformas",
                "Consumíveis de montagem",
            ],
            Discipline::Eletrica => &[
                "Cabos e condutores",
                "Eletrocalhas e eletrodutos",
                "Quadros elétricos",
                "Suportes e fixações",
                "Aterramento",
                "Testes de isolação",
                "Andaimes e plataformas",
            ],
            Discipline::Automacao => &[
                "Controladores (CLP/DDC)",
                "Sensores e atuadores",
                "Cabeamento de controle",
                "Infraestrutura de eletrodutos",
                "Programação e parametrização",
                "Comissionamento",
                "Supervisório",
            ],
            Discipline::Tab => &[
                "Instrumentos calibrados",
                "Medição de vazões de ar",
                "Balanceamento hidrônico",
                "Relatório final de TAB",
                "Acesso a forros e shafts",
            ],
            Discipline::Movimentacoes => &[
                "Guindaste / munck",
                "Rigger e sinaleiro",
                "Plano de rigging",
                "Acessórios de içamento",
                "Isolamento de área",
                "Transporte horizontal",
            ],
            Discipline::LinhaDeCobre => &[
                "Tubos de cobre",
                "Isolamento elastomérico",
                "Solda e brasagem",
                "Nitrogênio para purga",
                "Teste de estanqueidade",
                "Vácuo e carga de gás refrigerante",
                "Suportes e fixações",
            ],
        }
    }

    fn standard_safety_docs(self) -> &'static [&'static str] {
        match self {
            Discipline::Dutos | Discipline::Tab => &[
                "PGR - Programa de Gerenciamento de Riscos",
                "PCMSO - Programa de Controle Médico de Saúde Ocupacional",
                "ASO - Atestado de Saúde Ocupacional",
                "Ficha de entrega de EPI",
                "NR-06 - Equipamentos de Proteção Individual",
                "NR-18 - Segurança e Saúde na Indústria da Construção",
                "NR-35 - Trabalho em Altura",
            ],
            Discipline::Hidraulica => &[
                "PGR - Programa de Gerenciamento de Riscos",
                "PCMSO - Programa de Controle Médico de Saúde Ocupacional",
                "ASO - Atestado de Saúde Ocupacional",
                "Ficha de entrega de EPI",
                "NR-06 - Equipamentos de Proteção Individual",
                "NR-18 - Segurança e Saúde na Indústria da Construção",
                "NR-33 - Espaços Confinados",
                "NR-35 - Trabalho em Altura",
            ],
            Discipline::Eletrica | Discipline::Automacao => &[
                "PGR - Programa de Gerenciamento de Riscos",
                "PCMSO - Programa de Controle Médico de Saúde Ocupacional",
                "ASO - Atestado de Saúde Ocupacional",
                "Ficha de entrega de EPI",
                "NR-06 - Equipamentos de Proteção Individual",
                "NR-10 - Segurança em Instalações e Serviços em Eletricidade",
                "NR-18 - Segurança e Saúde na Indústria da Construção",
                "NR-35 - Trabalho em Altura",
            ],
            Discipline::Movimentacoes => &[
                "PGR - Programa de Gerenciamento de Riscos",
                "PCMSO - Programa de Controle Médico de Saúde Ocupacional",
                "ASO - Atestado de Saúde Ocupacional",
                "Ficha de entrega de EPI",
                "NR-11 - Transporte, Movimentação, Armazenagem e Manuseio de Materiais",
                "NR-12 - Segurança no Trabalho em Máquinas e Equipamentos",
                "NR-18 - Segurança e Saúde na Indústria da Construção",
                "Certificado de inspeção do equipamento de içamento",
            ],
            Discipline::LinhaDeCobre => &[
                "PGR - Programa de Gerenciamento de Riscos",
                "PCMSO - Programa de Controle Médico de Saúde Ocupacional",
                "ASO - Atestado de Saúde Ocupacional",
                "Ficha de entrega de EPI",
                "NR-06 - Equipamentos de Proteção Individual",
                "NR-18 - Segurança e Saúde na Indústria da Construção",
                "NR-35 - Trabalho em Altura",
                "Permissão de Trabalho a Quente",
            ],
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Discipline {
    type Err = ParseDisciplineError;

    /// Accepts either the slug or the display name, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Discipline::ALL
            .into_iter()
            .find(|d| d.slug() == wanted || d.name().to_lowercase() == wanted)
            .ok_or_else(|| ParseDisciplineError(s.to_string()))
    }
}

impl TryFrom<String> for Discipline {
    type Error = ParseDisciplineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Discipline> for String {
    fn from(value: Discipline) -> Self {
        value.name().to_string()
    }
}

/// Everything that differs between the discipline pages
#[derive(Debug, Clone, Serialize)]
pub struct DisciplineConfig {
    pub discipline: Discipline,
    pub name: &'static str,
    pub slug: &'static str,
    pub matrix_item_catalog: &'static [&'static str],
    pub standard_safety_docs: &'static [&'static str],
    pub default_supplier_placeholder: String,
    pub technical_category: String,
    pub quality_category: String,
}

impl DisciplineConfig {
    pub fn for_discipline(discipline: Discipline) -> Self {
        Self {
            discipline,
            name: discipline.name(),
            slug: discipline.slug(),
            matrix_item_catalog: discipline.matrix_items(),
            standard_safety_docs: discipline.standard_safety_docs(),
            default_supplier_placeholder: format!(
                "PROPONENTE {}",
                discipline.name().to_uppercase()
            ),
            technical_category: format!("tecnico_{}", discipline.slug()),
            quality_category: format!("qualidade_{}", discipline.slug()),
        }
    }

    pub fn all() -> Vec<DisciplineConfig> {
        Discipline::ALL.into_iter().map(Self::for_discipline).collect()
    }

    pub fn is_matrix_item(&self, item: &str) -> bool {
        self.matrix_item_catalog.contains(&item)
    }

    /// Every catalog category known to the application, in a stable order
    pub fn known_categories() -> Vec<String> {
        let mut categories: Vec<String> = Discipline::ALL
            .into_iter()
            .flat_map(|d| {
                let config = d.config();
                [config.technical_category, config.quality_category]
            })
            .collect();
        categories.push(SAFETY_CATEGORY.to_string());
        categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("hidraulica", Discipline::Hidraulica)]
    #[case("Hidráulica", Discipline::Hidraulica)]
    #[case("  LINHA DE COBRE ", Discipline::LinhaDeCobre)]
    #[case("cobre", Discipline::LinhaDeCobre)]
    #[case("tab", Discipline::Tab)]
    fn test_parse_discipline(#[case] input: &str, #[case] expected: Discipline) {
        assert_eq!(input.parse::<Discipline>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_discipline() {
        assert_eq!(
            "Pintura".parse::<Discipline>(),
            Err(ParseDisciplineError("Pintura".to_string()))
        );
    }

    #[test]
    fn test_supplier_placeholder_is_uppercased_name() {
        assert_eq!(
            Discipline::Hidraulica.config().default_supplier_placeholder,
            "PROPONENTE HIDRÁULICA"
        );
        assert_eq!(
            Discipline::LinhaDeCobre.config().default_supplier_placeholder,
            "PROPONENTE LINHA DE COBRE"
        );
    }

    #[test]
    fn test_every_discipline_has_catalogs() {
        for config in DisciplineConfig::all() {
            assert!(!config.matrix_item_catalog.is_empty(), "{}", config.name);
            assert!(!config.standard_safety_docs.is_empty(), "{}", config.name);
            assert!(config.technical_category.starts_with("tecnico_"));
            assert!(config.quality_category.starts_with("qualidade_"));
        }
    }

    #[test]
    fn test_known_categories_include_safety() {
        let categories = DisciplineConfig::known_categories();
        assert_eq!(categories.len(), 15);
        assert!(categories.contains(&"sms".to_string()));
        assert!(categories.contains(&"qualidade_cobre".to_string()));
        assert!(categories.contains(&"tecnico_hidraulica".to_string()));
    }

    #[test]
    fn test_discipline_serializes_as_display_name() {
        let json = serde_json::to_string(&Discipline::Eletrica).unwrap();
        assert_eq!(json, "\"Elétrica\"");
        let back: Discipline = serde_json::from_str("\"eletrica\"").unwrap();
        assert_eq!(back, Discipline::Eletrica);
    }
}
