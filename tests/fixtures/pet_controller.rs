// Annotated controller fixture
use actix_web::{web, HttpRequest, Responder};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Pet {
    pub id: u32,
    pub name: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct NewPet {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct Owner {
    pub name: String,
}

pub struct PetController;

#[request_mapping("/pets", "/animals")]
impl PetController {
    #[request_mapping]
    #[api_operation(value = "List pets", notes = "Paged listing", response_class = "Pet", multi_value_response = true, tags = "pets,,store,pets")]
    async fn list_pets(
        &self,
        #[api_param(value = "Filter by status", default_value = "available", allowable_values = "available,pending,sold", allow_multiple = true)]
        status: web::Query<Vec<String>>,
        #[api_param(name = "pageSize", allowable_values = "RANGEEXCLUSIVE[0,101]")]
        size: Option<u32>,
    ) -> web::Json<Vec<Pet>> {
        todo!()
    }

    #[request_mapping("/{id}", "/by-id/{id}")]
    #[api_operation(value = "Find pet by id", tags = "pets")]
    #[api_model(type = Pet)]
    async fn find_pet(
        &self,
        #[api_param(name = "petId", value = "ID of the pet", required = true, allowable_values = "range[1,")]
        Path(id): web::Path<u32>,
        req: HttpRequest,
    ) -> impl Responder {
        todo!()
    }

    #[request_mapping(method = "POST")]
    #[api_operation("Add a pet")]
    async fn add_pet(
        &self,
        #[api_param(value = "Pet to add", required = true)]
        #[api_model(type = NewPet, name = "PetInput")]
        body: web::Json<NewPet>,
    ) -> Result<web::Json<Pet>, Error> {
        todo!()
    }

    #[request_mapping("/*/owner")]
    #[api_model(type = Owner)]
    async fn owner(&self, verbose: Option<bool>) -> web::Json<Pet> {
        todo!()
    }

    fn not_a_handler(&self) -> u32 {
        0
    }
}

impl OrderController {
    #[request_mapping("orders/{id}", method = "delete")]
    async fn cancel(&self, id: web::Path<u64>) {}
}
