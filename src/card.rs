use crate::dom::Dom;
use crate::error::Result;
use crate::recipe::Recipe;

pub const CARD_TAG: &str = "recipe-card";

/// Rules scoped to each card's shadow root.
pub const CARD_STYLE: &str = r#"
* {
  font-family: sans-serif;
  margin: 0;
  padding: 0;
}

a {
  text-decoration: none;
}

a:hover {
  text-decoration: underline;
}

article {
  align-items: center;
  border: 1px solid rgb(223, 225, 229);
  border-radius: 8px;
  display: grid;
  grid-template-rows: 118px 56px 14px 18px 15px 36px;
  height: auto;
  row-gap: 5px;
  padding: 0 16px 16px 16px;
  width: 178px;
}

div.rating {
  align-items: center;
  column-gap: 5px;
  display: flex;
}

div.rating>img {
  height: auto;
  display: inline-block;
  object-fit: scale-down;
  width: 78px;
}

article>img {
  border-top-left-radius: 8px;
  border-top-right-radius: 8px;
  height: 118px;
  object-fit: cover;
  margin-left: -16px;
  width: calc(100% + 32px);
}

p.ingredients {
  height: 32px;
  line-height: 16px;
  padding-top: 4px;
  overflow: hidden;
}

p.organization {
  color: black !important;
}

p.title {
  display: -webkit-box;
  font-size: 16px;
  height: 36px;
  line-height: 18px;
  overflow: hidden;
  -webkit-line-clamp: 2;
  -webkit-box-orient: vertical;
}

p:not(.title),
span,
time {
  color: #70757A;
  font-size: 12px;
}
"#;

/// A `<recipe-card>` host with an open shadow root holding the card style and
/// an `<article>` that [`RecipeCard::render`] fills.
#[derive(Debug, Clone)]
pub struct RecipeCard<D: Dom> {
    dom: D,
    host: D::Node,
    article: D::Node,
}

impl<D: Dom> RecipeCard<D> {
    pub fn new(dom: &D) -> Result<Self> {
        let host = dom.create_element(CARD_TAG)?;
        let shadow = dom.attach_shadow(&host)?;
        let style = dom.append_element(&shadow, "style")?;
        dom.set_text(&style, CARD_STYLE);
        let article = dom.append_element(&shadow, "article")?;
        Ok(Self {
            dom: dom.clone(),
            host,
            article,
        })
    }

    pub fn host(&self) -> &D::Node {
        &self.host
    }

    /// Replaces whatever the card showed before with `recipe`.
    pub fn render(&self, recipe: &Recipe) -> Result<()> {
        let dom = &self.dom;
        self.clear();

        let img = dom.append_element(&self.article, "img")?;
        dom.set_attribute(&img, "src", text(&recipe.img_src))?;
        dom.set_attribute(&img, "alt", text(&recipe.img_alt))?;

        let title = dom.append_element(&self.article, "p")?;
        dom.set_attribute(&title, "class", "title")?;
        let link = dom.append_element(&title, "a")?;
        dom.set_attribute(&link, "href", text(&recipe.title_lnk))?;
        dom.set_text(&link, text(&recipe.title_txt));

        let organization = dom.append_element(&self.article, "p")?;
        dom.set_attribute(&organization, "class", "organization")?;
        dom.set_text(&organization, text(&recipe.organization));

        let rating = dom.append_element(&self.article, "div")?;
        dom.set_attribute(&rating, "class", "rating")?;
        let score = dom.append_element(&rating, "span")?;
        dom.set_text(&score, &recipe.rating_text());
        let stars = recipe.star_rating();
        let icon = dom.append_element(&rating, "img")?;
        dom.set_attribute(&icon, "src", &stars.icon_src())?;
        dom.set_attribute(&icon, "alt", &stars.icon_alt())?;
        let count = dom.append_element(&rating, "span")?;
        dom.set_text(&count, &recipe.num_ratings_text());

        let time = dom.append_element(&self.article, "time")?;
        dom.set_text(&time, text(&recipe.length_time));

        let ingredients = dom.append_element(&self.article, "p")?;
        dom.set_attribute(&ingredients, "class", "ingredients")?;
        dom.set_text(&ingredients, text(&recipe.ingredients));

        log::debug!("Rendered card {:?}", recipe.title_txt);
        Ok(())
    }

    /// Leaves the article empty, for entries with nothing to show.
    pub fn clear(&self) {
        self.dom.clear_children(&self.article);
    }

    pub fn mount(&self, parent: &D::Node) -> Result<()> {
        self.dom.append_child(parent, &self.host)
    }
}

fn text(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryDom, MemoryNode};
    use crate::recipe::FieldValue;

    fn soup() -> Recipe {
        Recipe {
            img_src: Some("a.png".to_string()),
            img_alt: Some("A bowl of soup".to_string()),
            title_lnk: Some("https://example.com/soup".to_string()),
            title_txt: Some("Soup".to_string()),
            organization: Some("Soup Kitchen".to_string()),
            rating: Some(FieldValue::from(3i64)),
            num_ratings: Some(FieldValue::from(120i64)),
            length_time: Some("45 min".to_string()),
            ingredients: Some("Carrots, leeks, stock".to_string()),
            ..Recipe::default()
        }
    }

    fn article(card: &RecipeCard<MemoryDom>) -> MemoryNode {
        card.host()
            .shadow_root()
            .and_then(|shadow| shadow.first_by_tag("article"))
            .unwrap()
    }

    #[test]
    fn shows_every_field() {
        let card = RecipeCard::new(&MemoryDom).unwrap();
        card.render(&soup()).unwrap();
        let article = article(&card);

        let img = &article.element_children()[0];
        assert_eq!(img.attribute("src").as_deref(), Some("a.png"));
        assert_eq!(img.attribute("alt").as_deref(), Some("A bowl of soup"));
        let link = article.first_by_tag("a").unwrap();
        assert_eq!(
            link.attribute("href").as_deref(),
            Some("https://example.com/soup")
        );
        assert_eq!(link.text_content(), "Soup");
        assert_eq!(
            article.first_by_class("organization").unwrap().text_content(),
            "Soup Kitchen"
        );
        let rating = article.first_by_class("rating").unwrap().element_children();
        assert_eq!(rating[0].text_content(), "3");
        assert_eq!(
            rating[1].attribute("src").as_deref(),
            Some("/assets/images/icons/3-star.svg")
        );
        assert_eq!(rating[1].attribute("alt").as_deref(), Some("3 stars"));
        assert_eq!(rating[2].text_content(), "(120)");
        assert_eq!(article.first_by_tag("time").unwrap().text_content(), "45 min");
        assert_eq!(
            article.first_by_class("ingredients").unwrap().text_content(),
            "Carrots, leeks, stock"
        );
    }

    #[test]
    fn invalid_rating_keeps_its_text_but_shows_zero_stars() {
        let card = RecipeCard::new(&MemoryDom).unwrap();
        let recipe = Recipe {
            rating: Some(FieldValue::from(7i64)),
            ..soup()
        };
        card.render(&recipe).unwrap();
        let rating = article(&card).first_by_class("rating").unwrap().element_children();
        assert_eq!(rating[0].text_content(), "7");
        assert_eq!(
            rating[1].attribute("src").as_deref(),
            Some("/assets/images/icons/0-star.svg")
        );
    }

    #[test]
    fn rendering_again_replaces_the_content() {
        let card = RecipeCard::new(&MemoryDom).unwrap();
        card.render(&soup()).unwrap();
        let stew = Recipe {
            title_txt: Some("Stew".to_string()),
            ..soup()
        };
        card.render(&stew).unwrap();

        let article = article(&card);
        assert_eq!(article.element_children().len(), 6);
        assert_eq!(article.query_all(|n| n.tag().as_deref() == Some("a")).len(), 1);
        assert_eq!(article.first_by_tag("a").unwrap().text_content(), "Stew");
        let shadow = card.host().shadow_root().unwrap();
        assert_eq!(shadow.element_children().len(), 2);
    }

    #[test]
    fn clearing_empties_the_article() {
        let card = RecipeCard::new(&MemoryDom).unwrap();
        card.render(&soup()).unwrap();
        card.clear();
        assert!(article(&card).children().is_empty());
        assert_eq!(card.host().shadow_root().unwrap().element_children().len(), 2);
    }

    #[test]
    fn mounts_into_its_parent() {
        let dom = MemoryDom;
        let main = MemoryNode::element("main");
        let card = RecipeCard::new(&dom).unwrap();
        card.mount(&main).unwrap();
        assert_eq!(main.element_children().len(), 1);
        assert_eq!(main.element_children()[0].tag().as_deref(), Some(CARD_TAG));
    }
}
