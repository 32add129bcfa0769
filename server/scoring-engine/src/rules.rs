//! Fixed scoring guide: rules looked up by exact file name or by extension.
//!
//! Every rule family holds at most one rule per action. A family with no rule
//! for an action is a miss for that action, never a fallback to another family.

use serde::Serialize;

use crate::types::Action;

const PER_FILE: &str = "Por arquivo alterado";
const PER_DEPLOY: &str = "Por deploy";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComplexityLevel {
  pub label: &'static str,
  pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
  pub points: f64,
  pub guide_code: &'static str,
  pub description: &'static str,
  pub unit: &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub complexity_description: Option<&'static str>,
  #[serde(skip_serializing_if = "no_levels")]
  pub complexity_levels: &'static [ComplexityLevel],
}

fn no_levels(levels: &&'static [ComplexityLevel]) -> bool {
  levels.is_empty()
}

/// Rules for one file name or extension, per action.
#[derive(Debug)]
pub struct RuleFamily {
  add: Option<&'static Rule>,
  modify: Option<&'static Rule>,
}

impl RuleFamily {
  pub fn for_action(&self, action: Action) -> Option<&'static Rule> {
    match action {
      Action::Add => self.add,
      Action::Modify => self.modify,
      Action::Delete => None,
    }
  }
}

/// Which table a lookup goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKey<'a> {
  ByName(&'a str),
  ByExtension(&'a str),
}

/// Look up the rule for a key and action. `None` means no match at that table.
pub fn lookup(key: RuleKey<'_>, action: Action) -> Option<&'static Rule> {
  let family = match key {
    RuleKey::ByName(name) => by_name(name)?,
    RuleKey::ByExtension(ext) => by_extension(ext)?,
  };
  family.for_action(action)
}

fn by_name(name: &str) -> Option<&'static RuleFamily> {
  match name {
    "karma.conf.js" | "Jenkinsfile" | "package.json" | "tsconfig.json" | ".eslintrc.json"
    | ".gitignore" | ".prettierignore" | ".prettierrc" | "webpack.config.js" | "settings.json" => {
      Some(&CONFIG_FILE)
    }
    "README.md" => Some(&README),
    "values.yaml" => Some(&DEPLOY_VALUES),
    _ => None,
  }
}

fn by_extension(ext: &str) -> Option<&'static RuleFamily> {
  match ext {
    "spec.ts" | "spec.js" | "test.js" | "test.ts" | "spec.json" => Some(&AUTOMATED_TEST),
    "html" | "xhtml" => Some(&SCREEN),
    "css" | "scss" => Some(&STYLESHEET),
    "js" | "ts" | "tsx" => Some(&JAVASCRIPT),
    "xml" => Some(&KEY_VALUE),
    "java" => Some(&JAVA),
    "Dockerfile" => Some(&DOCKERFILE),
    "docker-compose" => Some(&DOCKER_COMPOSE),
    _ => None,
  }
}

/// Complexity tiers for a guide code; empty when the code has none.
pub fn complexity_levels(guide_code: &str) -> &'static [ComplexityLevel] {
  ALL_RULES
    .iter()
    .find(|r| r.guide_code == guide_code && !r.complexity_levels.is_empty())
    .map(|r| r.complexity_levels)
    .unwrap_or(&[])
}

/// Whether a guide code's lines are partitioned by effective points (the CSS tiers).
pub fn has_complexity_tiers(guide_code: &str) -> bool {
  !complexity_levels(guide_code).is_empty()
}

// ---------------------------------------------------------------------------
// Rule definitions
// ---------------------------------------------------------------------------

static CONFIG_CREATE: Rule = Rule {
  points: 2.5,
  guide_code: "5.10.7",
  description: "Criação do arquivo de configuração",
  unit: PER_FILE,
  complexity_description: None,
  complexity_levels: &[],
};

static CONFIG_CHANGE: Rule = Rule {
  points: 1.5,
  guide_code: "5.10.8",
  description: "Alteração do arquivo de configuração",
  unit: PER_FILE,
  complexity_description: None,
  complexity_levels: &[],
};

static README_DOC: Rule = Rule {
  points: 3.0,
  guide_code: "5.26.2",
  description: "Elaboração de documentação README e documentos auxiliares da aplicação",
  unit: PER_FILE,
  complexity_description: Some(
    "Elaboração de documentação do sistema, Ajustes em documentos para esteira de compilação",
  ),
  complexity_levels: &[],
};

static VALUES_DEPLOY: Rule = Rule {
  points: 5.0,
  guide_code: "5.26.3",
  description: "Construção/Alteração de arquivos requirements ou values para deploy no ambiente Cloud",
  unit: PER_DEPLOY,
  complexity_description: Some("Ajustes em arquivos para esteira de deploy da aplicação"),
  complexity_levels: &[],
};

static TEST_CREATE: Rule = Rule {
  points: 8.0,
  guide_code: "5.10.18",
  description: "Criação de objeto de teste automatizado",
  unit: PER_FILE,
  complexity_description: None,
  complexity_levels: &[],
};

static TEST_CHANGE: Rule = Rule {
  points: 4.0,
  guide_code: "5.10.21",
  description: "Alteração de objeto de teste automatizado",
  unit: PER_FILE,
  complexity_description: None,
  complexity_levels: &[],
};

static SCREEN_CREATE: Rule = Rule {
  points: 10.0,
  guide_code: "5.10.1",
  description:
    "Criação de tela HTML ou XHTML ou JSP ou XML ou VTL ou XSL ou Swing ou AWT ou XUI ou PHP",
  unit: PER_FILE,
  complexity_description: None,
  complexity_levels: &[],
};

static SCREEN_CHANGE: Rule = Rule {
  points: 5.0,
  guide_code: "5.10.2",
  description:
    "Alteração de tela HTML ou XHTML ou JSP ou XML ou VTL ou XSL ou Swing ou AWT ou XUI ou PHP",
  unit: PER_FILE,
  complexity_description: None,
  complexity_levels: &[],
};

static CSS_CREATE: Rule = Rule {
  points: 8.0,
  guide_code: "5.10.3",
  description: "Criação CSS ou SCSS",
  unit: PER_FILE,
  complexity_description: None,
  complexity_levels: &[
    ComplexityLevel { label: "baixa", value: 8.0 },
    ComplexityLevel { label: "media", value: 16.0 },
    ComplexityLevel { label: "alta", value: 24.0 },
  ],
};

static CSS_CHANGE: Rule = Rule {
  points: 4.0,
  guide_code: "5.10.4",
  description: "Alteração CSS ou SCSS",
  unit: PER_FILE,
  complexity_description: None,
  complexity_levels: &[
    ComplexityLevel { label: "baixa", value: 4.0 },
    ComplexityLevel { label: "media", value: 8.0 },
    ComplexityLevel { label: "alta", value: 12.0 },
  ],
};

static JS_CREATE: Rule = Rule {
  points: 10.0,
  guide_code: "5.10.5",
  description: "Criação JavaScript",
  unit: PER_FILE,
  complexity_description: None,
  complexity_levels: &[],
};

static JS_CHANGE: Rule = Rule {
  points: 5.0,
  guide_code: "5.10.6",
  description: "Alteração JavaScript",
  unit: PER_FILE,
  complexity_description: None,
  complexity_levels: &[],
};

static XML_CREATE: Rule = Rule {
  points: 2.5,
  guide_code: "5.10.7",
  description: "Criação de arquivo chave/valor ou tipo XML",
  unit: PER_FILE,
  complexity_description: None,
  complexity_levels: &[],
};

static XML_CHANGE: Rule = Rule {
  points: 1.5,
  guide_code: "5.10.8",
  description: "Alteração de arquivo chave/valor ou tipo XML (jenkinfiles, pom.xml, package.json)",
  unit: PER_FILE,
  complexity_description: None,
  complexity_levels: &[],
};

static JAVA_CREATE: Rule = Rule {
  points: 5.5,
  guide_code: "5.10.9",
  description: "Criação de objetos de Integração e Negócio Java",
  unit: PER_FILE,
  complexity_description: None,
  complexity_levels: &[],
};

static JAVA_CHANGE: Rule = Rule {
  points: 3.5,
  guide_code: "5.10.10",
  description: "Alteração de Objetos de Integração e Negócio Java",
  unit: PER_FILE,
  complexity_description: None,
  complexity_levels: &[],
};

static DOCKERFILE_DEF: Rule = Rule {
  points: 2.0,
  guide_code: "5.15.8",
  description: "Alteração de arquivo de definição \"Dockerfile\"",
  unit: PER_FILE,
  complexity_description: None,
  complexity_levels: &[],
};

static DOCKER_COMPOSE_DEF: Rule = Rule {
  points: 2.0,
  guide_code: "5.15.8",
  description: "Alteração de arquivo de definição \"Docker Compose\"",
  unit: PER_FILE,
  complexity_description: None,
  complexity_levels: &[],
};

static ALL_RULES: [&Rule; 18] = [
  &CONFIG_CREATE,
  &CONFIG_CHANGE,
  &README_DOC,
  &VALUES_DEPLOY,
  &TEST_CREATE,
  &TEST_CHANGE,
  &SCREEN_CREATE,
  &SCREEN_CHANGE,
  &CSS_CREATE,
  &CSS_CHANGE,
  &JS_CREATE,
  &JS_CHANGE,
  &XML_CREATE,
  &XML_CHANGE,
  &JAVA_CREATE,
  &JAVA_CHANGE,
  &DOCKERFILE_DEF,
  &DOCKER_COMPOSE_DEF,
];

static CONFIG_FILE: RuleFamily = RuleFamily {
  add: Some(&CONFIG_CREATE),
  modify: Some(&CONFIG_CHANGE),
};

static README: RuleFamily = RuleFamily {
  add: Some(&README_DOC),
  modify: Some(&README_DOC),
};

static DEPLOY_VALUES: RuleFamily = RuleFamily {
  add: Some(&VALUES_DEPLOY),
  modify: Some(&VALUES_DEPLOY),
};

static AUTOMATED_TEST: RuleFamily = RuleFamily {
  add: Some(&TEST_CREATE),
  modify: Some(&TEST_CHANGE),
};

static SCREEN: RuleFamily = RuleFamily {
  add: Some(&SCREEN_CREATE),
  modify: Some(&SCREEN_CHANGE),
};

static STYLESHEET: RuleFamily = RuleFamily {
  add: Some(&CSS_CREATE),
  modify: Some(&CSS_CHANGE),
};

static JAVASCRIPT: RuleFamily = RuleFamily {
  add: Some(&JS_CREATE),
  modify: Some(&JS_CHANGE),
};

static KEY_VALUE: RuleFamily = RuleFamily {
  add: Some(&XML_CREATE),
  modify: Some(&XML_CHANGE),
};

static JAVA: RuleFamily = RuleFamily {
  add: Some(&JAVA_CREATE),
  modify: Some(&JAVA_CHANGE),
};

static DOCKERFILE: RuleFamily = RuleFamily {
  add: Some(&DOCKERFILE_DEF),
  modify: Some(&DOCKERFILE_DEF),
};

static DOCKER_COMPOSE: RuleFamily = RuleFamily {
  add: Some(&DOCKER_COMPOSE_DEF),
  modify: Some(&DOCKER_COMPOSE_DEF),
};
