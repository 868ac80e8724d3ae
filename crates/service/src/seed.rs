//! Startup sample data. The loader is idempotent: seeded cooks and all
//! dishes are replaced on every run, registered customers are kept.

use chrono::Utc;
use tracing::{info, instrument};

use models::{CookProfile, Dish, User, UserRole};

use crate::errors::ServiceError;
use crate::store::{Filter, Store};

#[instrument(skip(store))]
pub async fn run(store: &Store) -> Result<(), ServiceError> {
    let users = store.users();
    let dishes = store.dishes();

    users.delete_many(&Filter::new().eq("type", UserRole::Cook.as_str())).await?;
    dishes.delete_many(&Filter::new()).await?;

    let cooks = sample_cooks();
    let menu = sample_dishes();
    users.insert_many(&cooks).await?;
    dishes.insert_many(&menu).await?;

    info!(cooks = cooks.len(), dishes = menu.len(), "sample data loaded");
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cook(
    name: &str,
    email: &str,
    phone: &str,
    address: &str,
    specialties: &str,
    experience: u32,
    description: &str,
    average_rating: f64,
    total_orders: u64,
    total_ratings: u64,
    delivery_radius: u32,
    preparation_time: &str,
) -> User {
    User {
        id: None,
        name: name.into(),
        email: email.into(),
        phone: phone.into(),
        address: address.into(),
        role: UserRole::Cook,
        registration_date: Utc::now(),
        is_available: true,
        cook: Some(CookProfile {
            specialties: specialties.into(),
            experience,
            description: description.into(),
            average_rating,
            total_orders,
            total_ratings,
            delivery_radius,
            preparation_time: preparation_time.into(),
            profile_pic: None,
            profile_pic_url: None,
        }),
    }
}

#[allow(clippy::too_many_arguments)]
fn dish(
    id: &str,
    cook_email: &str,
    cook_name: &str,
    name: &str,
    description: &str,
    price: i64,
    category: &str,
    cuisine: &str,
    prep_time: u32,
    spice_level: &str,
    is_vegetarian: bool,
    calories: u32,
    image_url: &str,
    average_rating: f64,
    total_ratings: u64,
) -> Dish {
    Dish {
        id: Some(id.into()),
        cook_email: cook_email.into(),
        cook_name: cook_name.into(),
        name: name.into(),
        description: description.into(),
        price,
        category: category.into(),
        cuisine: cuisine.into(),
        prep_time,
        spice_level: spice_level.into(),
        is_available: true,
        is_vegetarian,
        calories,
        image: None,
        image_url: Some(image_url.into()),
        average_rating,
        total_ratings,
        date_added: Utc::now(),
    }
}

fn sample_cooks() -> Vec<User> {
    vec![
        cook(
            "Arjun Singh",
            "arjun@homemeals.com",
            "+91-9876543201",
            "Rajouri Garden, New Delhi",
            "Punjabi, Tandoor, Street Food, Parathas",
            9,
            "Passionate Punjabi home cook with 9+ years of experience.",
            4.6,
            245,
            134,
            12,
            "25-35 mins",
        ),
        cook(
            "Kavya Reddy",
            "kavya@homemeals.com",
            "+91-9876543202",
            "Hitech City, Hyderabad",
            "Andhra, Telangana, Spicy Curries, Biryanis",
            7,
            "Andhra home cuisine expert specializing in fiery curries and biryanis.",
            4.8,
            312,
            189,
            10,
            "35-45 mins",
        ),
        cook(
            "Rohit Jain",
            "rohit@homemeals.com",
            "+91-9876543203",
            "Andheri East, Mumbai",
            "Maharashtrian, Gujarati, Jain Food, Thalis",
            6,
            "Pure vegetarian Maharashtrian and Gujarati dishes.",
            4.4,
            198,
            112,
            8,
            "30-40 mins",
        ),
        cook(
            "Sneha Iyer",
            "sneha@homemeals.com",
            "+91-9876543204",
            "Indiranagar, Bangalore",
            "Tamil, Karnataka, Filter Coffee, Breakfast",
            11,
            "Traditional South Indian home cook.",
            4.7,
            456,
            267,
            9,
            "20-30 mins",
        ),
        cook(
            "Amit Gupta",
            "amit@homemeals.com",
            "+91-9876543205",
            "Park Street, Kolkata",
            "Bengali, Mughlai, Fish Curry, Sweets",
            13,
            "Bengali home cuisine master.",
            4.9,
            567,
            298,
            14,
            "40-50 mins",
        ),
        cook(
            "Priya Nambiar",
            "priya@homemeals.com",
            "+91-9876543206",
            "Marine Drive, Kochi",
            "Kerala, Coastal, Coconut Dishes, Seafood",
            8,
            "Kerala home cook bringing authentic flavors.",
            4.5,
            289,
            156,
            11,
            "35-45 mins",
        ),
    ]
}

fn sample_dishes() -> Vec<Dish> {
    vec![
        dish(
            "1",
            "arjun@homemeals.com",
            "Arjun Singh",
            "Amritsari Kulcha",
            "Authentic Amritsari kulcha stuffed with spiced potatoes, served with chole and pickled onions.",
            95,
            "Lunch",
            "Punjabi",
            25,
            "Medium",
            true,
            380,
            "https://images.unsplash.com/photo-1601050690597-df0568f70950?w=400&h=300&fit=crop",
            4.7,
            68,
        ),
        dish(
            "2",
            "arjun@homemeals.com",
            "Arjun Singh",
            "Chole Bhature",
            "Fluffy homemade bhature with spicy chickpea curry, garnished with onions and green chutney.",
            85,
            "Breakfast",
            "Punjabi",
            20,
            "Medium",
            true,
            450,
            "https://images.unsplash.com/photo-1626082927389-6cd097cdc6ec?w=400&h=300&fit=crop",
            4.5,
            89,
        ),
        dish(
            "3",
            "arjun@homemeals.com",
            "Arjun Singh",
            "Tandoori Paneer Tikka",
            "Smoky paneer tikka marinated in yogurt and home-ground spices, grilled with bell peppers.",
            165,
            "Snacks",
            "Punjabi",
            30,
            "High",
            true,
            320,
            "https://images.unsplash.com/photo-1599487488170-d11ec9c172f0?w=400&h=300&fit=crop",
            4.6,
            54,
        ),
        dish(
            "4",
            "arjun@homemeals.com",
            "Arjun Singh",
            "Butter Chicken",
            "Creamy tomato-based curry with tender chicken pieces, slow-cooked in aromatic spices.",
            195,
            "Dinner",
            "Punjabi",
            35,
            "Medium",
            false,
            520,
            "https://images.unsplash.com/photo-1588166524941-3bf61a9c41db?w=400&h=300&fit=crop",
            4.8,
            142,
        ),
        dish(
            "5",
            "arjun@homemeals.com",
            "Arjun Singh",
            "Makki di Roti with Sarson da Saag",
            "Traditional Punjabi cornmeal flatbread served with mustard greens curry and jaggery.",
            120,
            "Lunch",
            "Punjabi",
            40,
            "Medium",
            true,
            350,
            "https://images.unsplash.com/photo-1596797038530-2c107229654b?w=400&h=300&fit=crop",
            4.4,
            76,
        ),
        dish(
            "6",
            "kavya@homemeals.com",
            "Kavya Reddy",
            "Hyderabadi Biryani",
            "Aromatic basmati rice layered with spiced mutton, cooked in dum style with saffron and mint.",
            220,
            "Lunch",
            "Andhra",
            55,
            "Medium",
            false,
            580,
            "https://images.unsplash.com/photo-1563379091339-03246963d51a?w=400&h=300&fit=crop",
            4.9,
            123,
        ),
        dish(
            "7",
            "kavya@homemeals.com",
            "Kavya Reddy",
            "Andhra Chicken Curry",
            "Spicy Andhra-style chicken curry with traditional spices, coconut, and curry leaves.",
            180,
            "Dinner",
            "Andhra",
            45,
            "High",
            false,
            420,
            "https://images.unsplash.com/photo-1565557623262-b51c2513a641?w=400&h=300&fit=crop",
            4.8,
            98,
        ),
        dish(
            "8",
            "kavya@homemeals.com",
            "Kavya Reddy",
            "Gongura Mutton",
            "Traditional Andhra mutton curry cooked with tangy sorrel leaves and authentic spices.",
            250,
            "Dinner",
            "Andhra",
            60,
            "High",
            false,
            480,
            "https://images.unsplash.com/photo-1574653057686-61d6c4b6bb15?w=400&h=300&fit=crop",
            4.7,
            54,
        ),
        dish(
            "9",
            "kavya@homemeals.com",
            "Kavya Reddy",
            "Pesarattu",
            "Healthy green gram dosa from Andhra Pradesh, served with ginger chutney and sambar.",
            75,
            "Breakfast",
            "Andhra",
            20,
            "Low",
            true,
            280,
            "https://images.unsplash.com/photo-1567188040759-fb8a883dc6d8?w=400&h=300&fit=crop",
            4.3,
            67,
        ),
        dish(
            "10",
            "rohit@homemeals.com",
            "Rohit Jain",
            "Gujarati Thali",
            "Complete traditional Gujarati meal with dal, sabzi, roti, rice, and sweets.",
            150,
            "Lunch",
            "Gujarati",
            25,
            "Medium",
            true,
            650,
            "https://images.unsplash.com/photo-1546833999-b9f581a1996d?w=400&h=300&fit=crop",
            4.6,
            89,
        ),
        dish(
            "11",
            "rohit@homemeals.com",
            "Rohit Jain",
            "Dhokla",
            "Steamed gram flour cake from Gujarat, light and spongy, served with green chutney.",
            60,
            "Snacks",
            "Gujarati",
            30,
            "Low",
            true,
            180,
            "https://images.unsplash.com/photo-1589301760014-d929f3979dbc?w=400&h=300&fit=crop",
            4.4,
            112,
        ),
        dish(
            "12",
            "rohit@homemeals.com",
            "Rohit Jain",
            "Misal Pav",
            "Spicy Maharashtrian curry made with sprouts, served with pav bread and farsan.",
            85,
            "Breakfast",
            "Maharashtrian",
            25,
            "High",
            true,
            320,
            "https://images.unsplash.com/photo-1606491956689-2ea866880c84?w=400&h=300&fit=crop",
            4.5,
            78,
        ),
        dish(
            "13",
            "rohit@homemeals.com",
            "Rohit Jain",
            "Undhiyu",
            "Mixed vegetable curry from Gujarat with seasonal vegetables and spices.",
            135,
            "Lunch",
            "Gujarati",
            45,
            "Medium",
            true,
            290,
            "https://images.unsplash.com/photo-1505253304499-671c55fb57fe?w=400&h=300&fit=crop",
            4.2,
            45,
        ),
        dish(
            "14",
            "sneha@homemeals.com",
            "Sneha Iyer",
            "Masala Dosa",
            "Crispy fermented rice crepe filled with spiced potato curry, served with sambar and chutney.",
            80,
            "Breakfast",
            "South Indian",
            20,
            "Medium",
            true,
            350,
            "https://images.unsplash.com/photo-1589301760014-d929f3979dbc?w=400&h=300&fit=crop",
            4.8,
            156,
        ),
        dish(
            "15",
            "sneha@homemeals.com",
            "Sneha Iyer",
            "Idli Sambar",
            "Steamed rice cakes served with lentil curry and coconut chutney.",
            55,
            "Breakfast",
            "South Indian",
            15,
            "Low",
            true,
            220,
            "https://images.unsplash.com/photo-1567188040759-fb8a883dc6d8?w=400&h=300&fit=crop",
            4.6,
            134,
        ),
        dish(
            "16",
            "sneha@homemeals.com",
            "Sneha Iyer",
            "Chettinad Chicken",
            "Spicy Tamil Nadu chicken curry with black pepper, star anise, and coconut.",
            190,
            "Dinner",
            "Tamil",
            40,
            "High",
            false,
            480,
            "https://images.unsplash.com/photo-1565557623262-b51c2513a641?w=400&h=300&fit=crop",
            4.7,
            87,
        ),
        dish(
            "17",
            "sneha@homemeals.com",
            "Sneha Iyer",
            "Vada",
            "Deep-fried lentil donuts served with sambar and coconut chutney.",
            45,
            "Snacks",
            "South Indian",
            25,
            "Medium",
            true,
            280,
            "https://images.unsplash.com/photo-1606491956689-2ea866880c84?w=400&h=300&fit=crop",
            4.3,
            92,
        ),
        dish(
            "18",
            "sneha@homemeals.com",
            "Sneha Iyer",
            "Rasam Rice",
            "Tangy tamarind-based soup with rice, a comfort food from South India.",
            70,
            "Lunch",
            "South Indian",
            20,
            "Medium",
            true,
            320,
            "https://images.unsplash.com/photo-1546833999-b9f581a1996d?w=400&h=300&fit=crop",
            4.4,
            68,
        ),
        dish(
            "19",
            "amit@homemeals.com",
            "Amit Gupta",
            "Fish Curry (Maach Bhaat)",
            "Traditional Bengali fish curry with rice, cooked in mustard oil and spices.",
            160,
            "Lunch",
            "Bengali",
            35,
            "Medium",
            false,
            380,
            "https://images.unsplash.com/photo-1565299624946-b28f40a0ca4b?w=400&h=300&fit=crop",
            4.9,
            176,
        ),
        dish(
            "20",
            "amit@homemeals.com",
            "Amit Gupta",
            "Kosha Mangsho",
            "Slow-cooked Bengali mutton curry with onions, ginger, and aromatic spices.",
            240,
            "Dinner",
            "Bengali",
            50,
            "Medium",
            false,
            520,
            "https://images.unsplash.com/photo-1574653057686-61d6c4b6bb15?w=400&h=300&fit=crop",
            4.8,
            134,
        ),
        dish(
            "21",
            "amit@homemeals.com",
            "Amit Gupta",
            "Aloo Posto",
            "Bengali potato curry cooked with poppy seed paste and green chilies.",
            90,
            "Lunch",
            "Bengali",
            25,
            "Low",
            true,
            250,
            "https://images.unsplash.com/photo-1505253304499-671c55fb57fe?w=400&h=300&fit=crop",
            4.5,
            89,
        ),
        dish(
            "22",
            "amit@homemeals.com",
            "Amit Gupta",
            "Mishti Doi",
            "Sweet yogurt dessert from Bengal, set in earthen pots for authentic flavor.",
            45,
            "Dessert",
            "Bengali",
            10,
            "None",
            true,
            150,
            "https://images.unsplash.com/photo-1488477181946-6428a0291777?w=400&h=300&fit=crop",
            4.6,
            102,
        ),
        dish(
            "23",
            "priya@homemeals.com",
            "Priya Nambiar",
            "Kerala Fish Curry",
            "Coconut-based fish curry with curry leaves, kokum, and traditional Kerala spices.",
            175,
            "Lunch",
            "Kerala",
            30,
            "Medium",
            false,
            320,
            "https://images.unsplash.com/photo-1565299624946-b28f40a0ca4b?w=400&h=300&fit=crop",
            4.7,
            98,
        ),
        dish(
            "24",
            "priya@homemeals.com",
            "Priya Nambiar",
            "Appam with Stew",
            "Fermented rice pancakes served with coconut milk-based vegetable or chicken stew.",
            120,
            "Breakfast",
            "Kerala",
            25,
            "Low",
            true,
            290,
            "https://images.unsplash.com/photo-1589301760014-d929f3979dbc?w=400&h=300&fit=crop",
            4.5,
            76,
        ),
        dish(
            "25",
            "priya@homemeals.com",
            "Priya Nambiar",
            "Puttu with Kadala Curry",
            "Steamed rice cakes served with spiced black chickpea curry, a Kerala breakfast staple.",
            85,
            "Breakfast",
            "Kerala",
            30,
            "Medium",
            true,
            310,
            "https://images.unsplash.com/photo-1567188040759-fb8a883dc6d8?w=400&h=300&fit=crop",
            4.4,
            67,
        ),
        dish(
            "26",
            "priya@homemeals.com",
            "Priya Nambiar",
            "Avial",
            "Mixed vegetable curry with coconut and yogurt, a traditional Kerala sadya dish.",
            95,
            "Lunch",
            "Kerala",
            35,
            "Low",
            true,
            240,
            "https://images.unsplash.com/photo-1505253304499-671c55fb57fe?w=400&h=300&fit=crop",
            4.3,
            54,
        ),
        dish(
            "27",
            "priya@homemeals.com",
            "Priya Nambiar",
            "Prawn Curry",
            "Kerala-style prawn curry cooked in coconut milk with aromatic spices.",
            210,
            "Dinner",
            "Kerala",
            35,
            "Medium",
            false,
            380,
            "https://images.unsplash.com/photo-1565299624946-b28f40a0ca4b?w=400&h=300&fit=crop",
            4.8,
            89,
        ),
    ]
}
