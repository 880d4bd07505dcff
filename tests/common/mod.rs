//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::cmp::Ordering;

use xml_forge::{
    AttributeRole, ChildComparator, Document, ElementBuilder, ElementRole, FieldValue, Mappable,
    NodeId, NodeTransform, Schema, StringTransform,
};

pub const PLANO_DOCUMENT: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<plano>\n\
\t<curso>Mestrado em Engenharia Informática</curso>\n\
\t<fuc codigo=\"M4310\">\n\
\t\t<nome>Programação Avançada</nome>\n\
\t\t<ects>6.0</ects>\n\
\t\t<avaliacao>\n\
\t\t\t<componente nome=\"Quizzes\" peso=\"20%\"/>\n\
\t\t\t<componente nome=\"Projeto\" peso=\"80%\"/>\n\
\t\t</avaliacao>\n\
\t</fuc>\n\
\t<fuc codigo=\"03782\">\n\
\t\t<nome>Dissertação</nome>\n\
\t\t<ects>42.0</ects>\n\
\t\t<avaliacao>\n\
\t\t\t<componente nome=\"Dissertação\" peso=\"60%\"/>\n\
\t\t\t<componente nome=\"Apresentação\" peso=\"20%\"/>\n\
\t\t\t<componente nome=\"Discussão\" peso=\"20%\"/>\n\
\t\t</avaliacao>\n\
\t</fuc>\n\
</plano>";

/// Handles into the document built by [`plano`].
pub struct Plano {
    pub doc: Document,
    pub ects: Vec<NodeId>,
    pub componentes: Vec<NodeId>,
}

/// The study plan document, built node by node.
pub fn plano() -> Plano {
    let mut doc = Document::new();
    let plano = doc.create_root("plano", None).unwrap();
    doc.create_node("curso", Some("Mestrado em Engenharia Informática"), Some(plano))
        .unwrap();

    let mut ects = Vec::new();
    let mut componentes = Vec::new();
    let fucs: [(&str, &str, &str, &[(&str, &str)]); 2] = [
        (
            "M4310",
            "Programação Avançada",
            "6.0",
            &[("Quizzes", "20%"), ("Projeto", "80%")],
        ),
        (
            "03782",
            "Dissertação",
            "42.0",
            &[
                ("Dissertação", "60%"),
                ("Apresentação", "20%"),
                ("Discussão", "20%"),
            ],
        ),
    ];
    for (codigo, nome, creditos, avaliacoes) in fucs {
        let fuc = doc.create_node("fuc", None, Some(plano)).unwrap();
        doc.add_attribute(fuc, "codigo", codigo).unwrap();
        doc.create_node("nome", Some(nome), Some(fuc)).unwrap();
        ects.push(doc.create_node("ects", Some(creditos), Some(fuc)).unwrap());
        let avaliacao = doc.create_node("avaliacao", None, Some(fuc)).unwrap();
        for &(nome, peso) in avaliacoes {
            let componente = doc.create_node("componente", None, Some(avaliacao)).unwrap();
            doc.add_attribute(componente, "nome", nome).unwrap();
            doc.add_attribute(componente, "peso", peso).unwrap();
            componentes.push(componente);
        }
    }

    Plano {
        doc,
        ects,
        componentes,
    }
}

/// The same document through the fluent builder.
pub fn plano_builder() -> ElementBuilder {
    let componente = |nome: &str, peso: &str| {
        ElementBuilder::new("componente")
            .attribute("nome", nome)
            .attribute("peso", peso)
    };
    ElementBuilder::new("plano")
        .child(ElementBuilder::new("curso").text("Mestrado em Engenharia Informática"))
        .child(
            ElementBuilder::new("fuc")
                .attribute("codigo", "M4310")
                .child(ElementBuilder::new("nome").text("Programação Avançada"))
                .child(ElementBuilder::new("ects").text("6.0"))
                .child(
                    ElementBuilder::new("avaliacao")
                        .child(componente("Quizzes", "20%"))
                        .child(componente("Projeto", "80%")),
                ),
        )
        .child(
            ElementBuilder::new("fuc")
                .attribute("codigo", "03782")
                .child(ElementBuilder::new("nome").text("Dissertação"))
                .child(ElementBuilder::new("ects").text("42.0"))
                .child(ElementBuilder::new("avaliacao").children([
                    componente("Dissertação", "60%"),
                    componente("Apresentação", "20%"),
                    componente("Discussão", "20%"),
                ])),
        )
}

pub struct Componente {
    pub nome: String,
    pub peso: u32,
}

impl Componente {
    pub fn new(nome: &str, peso: u32) -> Self {
        Self {
            nome: nome.to_string(),
            peso,
        }
    }
}

impl Mappable for Componente {
    fn schema(&self) -> Option<Schema> {
        Some(Schema::new("componente").attribute("nome").attribute("peso"))
    }

    fn field_value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "nome" => self.nome.as_str().into(),
            "peso" => self.peso.into(),
            _ => FieldValue::Null,
        }
    }
}

/// A course unit whose evaluation components are wrapped in `<avaliacao>`.
pub struct Fuc {
    pub codigo: String,
    pub nome: String,
    pub ects: f64,
    pub observacoes: String,
    pub avaliacao: Vec<Componente>,
}

pub fn fuc() -> Fuc {
    Fuc {
        codigo: "M4310".to_string(),
        nome: "Programação Avançada".to_string(),
        ects: 6.0,
        observacoes: "la la...".to_string(),
        avaliacao: vec![Componente::new("Quizzes", 20), Componente::new("Projeto", 80)],
    }
}

impl Mappable for Fuc {
    fn schema(&self) -> Option<Schema> {
        Some(
            Schema::new("fuc")
                .attribute("codigo")
                .element("nome")
                .element("ects")
                .ignored("observacoes")
                .element_with("avaliacao", ElementRole::new().create_parent(true))
                .child_order(ChildComparator::by_tag_order(&["ects", "avaliacao", "nome"])),
        )
    }

    fn field_value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "codigo" => self.codigo.as_str().into(),
            "nome" => self.nome.as_str().into(),
            "ects" => self.ects.into(),
            "observacoes" => self.observacoes.as_str().into(),
            "avaliacao" => FieldValue::objects(&self.avaliacao),
            _ => FieldValue::Null,
        }
    }
}

/// A component whose weight is rendered as a percentage.
pub struct ComponentePercentual(pub Componente);

impl Mappable for ComponentePercentual {
    fn schema(&self) -> Option<Schema> {
        Some(
            Schema::new("componente")
                .attribute("nome")
                .attribute_with("peso", AttributeRole::new().transform(StringTransform::suffix("%"))),
        )
    }

    fn field_value(&self, field: &str) -> FieldValue<'_> {
        self.0.field_value(field)
    }
}

/// Components are attached directly under `<fuc>` and a post-build sort
/// moves them after the remaining children, which are ordered by tag.
pub struct FucOrdenada {
    pub codigo: String,
    pub nome: String,
    pub ects: f64,
    pub avaliacao: Vec<ComponentePercentual>,
}

pub fn fuc_ordenada() -> FucOrdenada {
    FucOrdenada {
        codigo: "M4310".to_string(),
        nome: "Programação Avançada".to_string(),
        ects: 6.0,
        avaliacao: vec![
            ComponentePercentual(Componente::new("Quizzes", 20)),
            ComponentePercentual(Componente::new("Projeto", 80)),
        ],
    }
}

impl Mappable for FucOrdenada {
    fn schema(&self) -> Option<Schema> {
        let componentes_last = ChildComparator::new(|a, b| {
            let rank = |tag: &str| tag == "componente";
            match rank(a.tag()).cmp(&rank(b.tag())) {
                Ordering::Equal if rank(a.tag()) => Ordering::Equal,
                Ordering::Equal => a.tag().cmp(b.tag()),
                other => other,
            }
        });
        Some(
            Schema::new("fuc")
                .attribute("codigo")
                .element("nome")
                .element("ects")
                .element("avaliacao")
                .post_build(NodeTransform::sort_children(componentes_last)),
        )
    }

    fn field_value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "codigo" => self.codigo.as_str().into(),
            "nome" => self.nome.as_str().into(),
            "ects" => self.ects.into(),
            "avaliacao" => FieldValue::objects(&self.avaliacao),
            _ => FieldValue::Null,
        }
    }
}
